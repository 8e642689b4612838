//! Copy planning
//!
//! Turns the configured package list into an ordered [`CopyPlan`]: one
//! [`CopyOperation`] per package, plus an optional cleanup directive that the
//! build adapter runs before any copy. Planning only queries the resolver; it
//! never touches the vendor directory.

pub mod template;

pub use template::{PATH_TEMPLATE_SUFFIX, expand_template};

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{self, Result};
use crate::resolver::PackageResolver;

/// Copy a package root into the vendor directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyOperation {
    /// Package name the operation was planned for
    pub package: String,
    /// Absolute root directory of the package
    pub from: PathBuf,
    /// Destination template relative to the vendor directory
    pub to: String,
}

/// Erase the contents of a directory before copying
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupDirective {
    pub root: PathBuf,
    /// Glob relative to `root` selecting what to remove
    pub pattern: String,
}

impl fmt::Display for CleanupDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.root.display(), self.pattern)
    }
}

/// Everything the build adapter needs to populate the vendor directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyPlan {
    pub vendor_path: PathBuf,
    /// Runs before every operation when present
    pub cleanup: Option<CleanupDirective>,
    pub operations: Vec<CopyOperation>,
}

/// Destination template for a package's files
pub fn destination_template(package: &str) -> String {
    format!("{package}/{PATH_TEMPLATE_SUFFIX}")
}

/// Plan the copy operations for `config`
///
/// `vendor_path` is the absolute vendor directory the cleanup directive
/// targets. Packages are resolved with the owning package as issuer.
///
/// # Errors
///
/// Returns `PackageNotFound` for the first package that cannot be resolved,
/// and `ConfigValidation` if the vendor directory overlaps a package root.
/// No partial plan is returned.
pub fn plan<R>(config: &Config, resolver: &R, vendor_path: &Path) -> Result<CopyPlan>
where
    R: PackageResolver + ?Sized,
{
    let operations = config
        .packages()
        .iter()
        .map(|package| {
            let from = resolver.resolve_location(package, config.for_package())?;
            debug!("Planned copy of {} from {}", package, from.display());
            Ok(CopyOperation {
                package: package.clone(),
                from,
                to: destination_template(package),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    for operation in &operations {
        ensure_disjoint(vendor_path, &operation.from)?;
    }

    let cleanup = config.clean_before().then(|| CleanupDirective {
        root: vendor_path.to_path_buf(),
        pattern: "**".to_string(),
    });

    Ok(CopyPlan {
        vendor_path: vendor_path.to_path_buf(),
        cleanup,
        operations,
    })
}

/// Check that the vendor directory neither contains nor sits inside `source`
///
/// The vendor directory is emptied and rewritten on every build, so any
/// overlap would destroy the files about to be copied.
///
/// # Errors
///
/// Returns `ConfigValidation` for the `dir` field on overlap.
pub fn ensure_disjoint(vendor_path: &Path, source: &Path) -> Result<()> {
    if vendor_path.starts_with(source) || source.starts_with(vendor_path) {
        return Err(error::config::validation(
            "dir",
            format!(
                "vendor directory {} overlaps package sources at {}",
                vendor_path.display(),
                source.display()
            ),
        ));
    }
    Ok(())
}
