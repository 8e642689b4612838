//! package.json loading
//!
//! Only the fields vendorize cares about are read: `name`, `version`, and the
//! `"vendorize"` configuration key. Everything else in the manifest is ignored.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use super::{Config, PACKAGE_KEY};
use crate::error::{self, Result, VendorizeError};

/// Manifest file name of a node package
pub const MANIFEST_FILE: &str = "package.json";

/// The subset of a package.json that vendorize reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    version: Option<Value>,

    #[serde(default, rename = "vendorize")]
    vendorize: Option<Value>,
}

impl PackageManifest {
    /// Parse manifest contents; `path` is only used in error messages
    ///
    /// # Errors
    ///
    /// Returns `ManifestParseFailed` if `json` is not a valid manifest.
    pub fn from_json(json: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            error::config::manifest_parse_failed(path.display().to_string(), e.to_string())
        })
    }

    /// Load `<package_dir>/package.json`
    ///
    /// # Errors
    ///
    /// Returns `ManifestNotFound` if there is no package.json in `package_dir`,
    /// `FileReadFailed` if it cannot be read, and `ManifestParseFailed` if it
    /// does not parse.
    pub fn load(package_dir: &Path) -> Result<Self> {
        let path = package_dir.join(MANIFEST_FILE);
        let json = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VendorizeError::ManifestNotFound {
                    path: package_dir.display().to_string(),
                }
            } else {
                error::fs::read_failed(&path, &e)
            }
        })?;
        Self::from_json(&json, &path)
    }

    /// Find the nearest directory at or above `start` containing a package.json
    pub fn find_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join(MANIFEST_FILE).is_file())
            .map(Path::to_path_buf)
    }

    /// Declared package name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Declared version, if present and a string
    pub fn version(&self) -> Option<&str> {
        self.version.as_ref().and_then(Value::as_str)
    }

    /// Build the vendorize configuration declared by this manifest
    ///
    /// The owning package is the manifest's own `name`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidation` if the manifest has no `name` or the section
    /// is invalid, and `MissingConfiguration` if there is no `"vendorize"` key.
    pub fn vendorize_config(&self) -> Result<Config> {
        let Some(name) = self.name() else {
            return Err(error::config::validation(
                "forPackage",
                "package.json must declare a non-empty \"name\"",
            ));
        };

        let Some(section) = self.vendorize.as_ref() else {
            return Err(error::config::missing(
                name,
                format!("no \"{PACKAGE_KEY}\" key found in {MANIFEST_FILE}"),
            ));
        };

        Config::from_section(name, section)
    }
}
