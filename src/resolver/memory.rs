//! Table-backed resolver
//!
//! Packages are registered up front with a location and optional metadata.
//! The issuer passed to lookups is ignored: every registered package is
//! visible from everywhere.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{PackageLocator, PackageMetadata, PackageResolver, package_name_from_specifier};
use crate::error::{self, Result};

#[derive(Debug, Clone)]
struct Entry {
    location: PathBuf,
    metadata: Option<PackageMetadata>,
}

/// In-memory [`PackageResolver`]
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    packages: BTreeMap<String, Entry>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package with a declared version, or none
    #[must_use]
    pub fn with_package(
        mut self,
        name: impl Into<String>,
        location: impl Into<PathBuf>,
        version: Option<&str>,
    ) -> Self {
        let name = name.into();
        let metadata = PackageMetadata {
            name: Some(name.clone()),
            version: version.map(str::to_string),
        };
        self.packages.insert(
            name,
            Entry {
                location: location.into(),
                metadata: Some(metadata),
            },
        );
        self
    }

    /// Register a package the resolver has no metadata for at all
    #[must_use]
    pub fn with_unreadable_package(
        mut self,
        name: impl Into<String>,
        location: impl Into<PathBuf>,
    ) -> Self {
        self.packages.insert(
            name.into(),
            Entry {
                location: location.into(),
                metadata: None,
            },
        );
        self
    }

    fn owner_of_path(&self, path: &Path) -> Option<PackageLocator> {
        self.packages
            .iter()
            .filter(|(_, entry)| path.starts_with(&entry.location))
            .max_by_key(|(_, entry)| entry.location.components().count())
            .map(|(name, entry)| PackageLocator::new(name.clone(), entry.location.clone()))
    }
}

impl PackageResolver for MemoryResolver {
    fn resolve_location(&self, name: &str, issuer: &str) -> Result<PathBuf> {
        self.packages
            .get(name)
            .map(|entry| entry.location.clone())
            .ok_or_else(|| error::package::not_found(name, issuer))
    }

    fn metadata(&self, locator: &PackageLocator) -> Result<Option<PackageMetadata>> {
        Ok(self
            .packages
            .get(&locator.name)
            .and_then(|entry| entry.metadata.clone()))
    }

    fn locate_owning_package(&self, request: &str) -> Option<PackageLocator> {
        let path = Path::new(request);
        if path.is_absolute() {
            return self.owner_of_path(path);
        }

        let name = package_name_from_specifier(request)?;
        self.packages
            .get(name)
            .map(|entry| PackageLocator::new(name, entry.location.clone()))
    }
}
