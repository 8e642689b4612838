//! The consuming package
//!
//! Vendorize runs from inside the package that owns the vendor directory. Its
//! package.json supplies both the owning package name and the `"vendorize"`
//! configuration.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{Config, PackageManifest};
use crate::error::{Result, VendorizeError};
use crate::resolver::NodeModulesResolver;
use crate::vendor::Vendorize;

/// A package that vendors dependencies into itself
#[derive(Debug)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: Config,
}

impl Workspace {
    /// Find the nearest package at or above `start`
    pub fn find_from(start: &Path) -> Option<PathBuf> {
        PackageManifest::find_from(start)
    }

    /// Open the package rooted at `root` and read its configuration
    ///
    /// # Errors
    ///
    /// Fails if `root` has no readable package.json, or if its `"vendorize"`
    /// key is missing or invalid.
    pub fn open(root: &Path) -> Result<Self> {
        let manifest = PackageManifest::load(root)?;
        let config = manifest.vendorize_config()?;
        debug!(
            "Loaded vendorize config for {} from {}",
            config.for_package(),
            root.display()
        );
        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    /// Open the package containing `start`
    ///
    /// # Errors
    ///
    /// Returns `ManifestNotFound` if no package.json exists at or above
    /// `start`, otherwise fails as [`Workspace::open`] does.
    pub fn discover(start: &Path) -> Result<Self> {
        let root = Self::find_from(start).ok_or_else(|| VendorizeError::ManifestNotFound {
            path: start.display().to_string(),
        })?;
        Self::open(&root)
    }

    /// Vendorize task backed by this package's `node_modules`
    pub fn into_vendorize(self) -> Vendorize<NodeModulesResolver> {
        let resolver = NodeModulesResolver::new(&self.root, self.config.for_package());
        Vendorize::new(self.config, resolver)
    }
}
