//! Package resolution
//!
//! The vendorize core never touches a package manager directly. Everything it
//! needs from the dependency graph goes through [`PackageResolver`]:
//! - locating a package's root directory by name, from the point of view of
//!   an issuer package
//! - reading a resolved package's own metadata
//! - finding which package owns a given asset request
//!
//! Two implementations ship with the crate:
//! - [`NodeModulesResolver`]: walks `node_modules` directories on disk
//! - [`MemoryResolver`]: a fixed table, for embedding and tests

pub mod memory;
pub mod node_modules;

pub use memory::MemoryResolver;
pub use node_modules::{NODE_MODULES, NodeModulesResolver};

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;

/// A resolved package: its name and root directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PackageLocator {
    pub name: String,
    pub location: PathBuf,
}

impl PackageLocator {
    pub fn new(name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }
}

/// Metadata a package declares about itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Read-only view of a package-resolution graph
///
/// Implementations must be safe to share between threads: asset rewriting may
/// query the resolver concurrently.
pub trait PackageResolver: Send + Sync {
    /// Absolute root directory of `name` as seen from `issuer`
    ///
    /// # Errors
    ///
    /// Returns `PackageNotFound` if `name` cannot be located.
    fn resolve_location(&self, name: &str, issuer: &str) -> Result<PathBuf>;

    /// Metadata of a resolved package, or `None` if it has none
    ///
    /// The metadata is read from the package itself, independently of which
    /// package asked.
    fn metadata(&self, locator: &PackageLocator) -> Result<Option<PackageMetadata>>;

    /// The package that owns an asset request, if one can be determined
    fn locate_owning_package(&self, request: &str) -> Option<PackageLocator>;
}

/// Split a bare specifier into its package name, e.g. `@scope/pkg/a.css` -> `@scope/pkg`
///
/// Returns `None` for relative or absolute requests and for malformed names.
pub fn package_name_from_specifier(request: &str) -> Option<&str> {
    if request.is_empty() || request.starts_with('.') || request.starts_with('/') {
        return None;
    }

    let mut separators = request.match_indices('/').map(|(i, _)| i);
    let end = if request.starts_with('@') {
        // Scoped packages need both the scope and the name segment
        separators.next()?;
        separators.next().unwrap_or(request.len())
    } else {
        separators.next().unwrap_or(request.len())
    };

    let name = &request[..end];
    if name.ends_with('/') || name == "@" {
        return None;
    }
    Some(name)
}

/// Whether `name` is usable as a path below a `node_modules` directory
pub fn is_valid_package_name(name: &str) -> bool {
    if name.is_empty() || name.starts_with('/') || name.contains('\\') {
        return false;
    }

    let segments: Vec<&str> = name.split('/').collect();
    let expected = if name.starts_with('@') { 2 } else { 1 };
    segments.len() == expected
        && segments
            .iter()
            .all(|s| !s.is_empty() && *s != "." && *s != ".." && *s != "@")
}
