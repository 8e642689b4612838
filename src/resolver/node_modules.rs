//! `node_modules` directory resolution
//!
//! Resolves packages the way node does for a flat or nested `node_modules`
//! install: starting at the issuer's root directory, each ancestor directory
//! is checked for `node_modules/<name>/package.json` and the first hit wins.
//!
//! The resolver is rooted at the consuming package, which always resolves to
//! its own directory under its own name.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{
    PackageLocator, PackageMetadata, PackageResolver, is_valid_package_name,
    package_name_from_specifier,
};
use crate::config::{MANIFEST_FILE, PackageManifest};
use crate::error::{self, Result, VendorizeError};

/// Directory holding installed dependencies
pub const NODE_MODULES: &str = "node_modules";

/// Filesystem resolver over `node_modules` directories
#[derive(Debug, Clone)]
pub struct NodeModulesResolver {
    root: PathBuf,
    root_name: String,
}

impl NodeModulesResolver {
    /// Create a resolver for the package at `root`, named `root_name`
    pub fn new(root: impl AsRef<Path>, root_name: impl Into<String>) -> Self {
        let root = root.as_ref();
        Self {
            root: dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf()),
            root_name: root_name.into(),
        }
    }

    /// Create a resolver for the package at `root`, named by its package.json
    ///
    /// # Errors
    ///
    /// Fails if the package.json cannot be loaded or declares no `name`.
    pub fn from_package_dir(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let manifest = PackageManifest::load(root)?;
        let name = manifest.name().ok_or_else(|| {
            error::config::validation(
                "forPackage",
                format!("{} has no \"name\"", root.join(MANIFEST_FILE).display()),
            )
        })?;
        Ok(Self::new(root, name))
    }

    /// Root directory of the consuming package
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Name of the consuming package
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    fn lookup(&self, name: &str, from: &Path) -> Option<PathBuf> {
        if name == self.root_name {
            return Some(self.root.clone());
        }

        if !is_valid_package_name(name) {
            return None;
        }

        from.ancestors()
            .map(|dir| dir.join(NODE_MODULES).join(name))
            .find(|candidate| candidate.join(MANIFEST_FILE).is_file())
            .map(|found| dunce::canonicalize(&found).unwrap_or(found))
    }

    fn issuer_dir(&self, issuer: &str) -> Result<PathBuf> {
        self.lookup(issuer, &self.root)
            .ok_or_else(|| error::package::not_found(issuer, &self.root_name))
    }

    fn owner_of_path(path: &Path) -> Option<PackageLocator> {
        let start = if path.is_dir() { path } else { path.parent()? };

        start.ancestors().find_map(|dir| {
            if !dir.join(MANIFEST_FILE).is_file() {
                return None;
            }
            match PackageManifest::load(dir) {
                Ok(manifest) => manifest
                    .name()
                    .map(|name| PackageLocator::new(name, dir.to_path_buf())),
                Err(e) => {
                    warn!("Skipping unreadable manifest in {}: {}", dir.display(), e);
                    None
                }
            }
        })
    }
}

impl PackageResolver for NodeModulesResolver {
    fn resolve_location(&self, name: &str, issuer: &str) -> Result<PathBuf> {
        let from = self.issuer_dir(issuer)?;
        let location = self
            .lookup(name, &from)
            .ok_or_else(|| error::package::not_found(name, issuer))?;
        debug!("Resolved {} from {} to {}", name, issuer, location.display());
        Ok(location)
    }

    fn metadata(&self, locator: &PackageLocator) -> Result<Option<PackageMetadata>> {
        match PackageManifest::load(&locator.location) {
            Ok(manifest) => Ok(Some(PackageMetadata {
                name: manifest.name().map(str::to_string),
                version: manifest.version().map(str::to_string),
            })),
            Err(VendorizeError::ManifestNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn locate_owning_package(&self, request: &str) -> Option<PackageLocator> {
        let path = Path::new(request);

        if path.is_absolute() {
            return Self::owner_of_path(path);
        }

        if request.starts_with("./") || request.starts_with("../") {
            return Self::owner_of_path(&self.root.join(path));
        }

        let name = package_name_from_specifier(request)?;
        self.lookup(name, &self.root)
            .map(|location| PackageLocator::new(name, location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_package(dir: &Path, manifest: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(MANIFEST_FILE), manifest).unwrap();
    }

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_package(root, r#"{ "name": "app", "vendorize": ["left-pad"] }"#);
        write_package(
            &root.join("node_modules/left-pad"),
            r#"{ "name": "left-pad", "version": "1.0.0" }"#,
        );
        write_package(
            &root.join("node_modules/@fontsource/inter"),
            r#"{ "name": "@fontsource/inter" }"#,
        );
        write_package(
            &root.join("node_modules/left-pad/node_modules/nested"),
            r#"{ "name": "nested", "version": "2.0.0" }"#,
        );
        temp
    }

    #[test]
    fn test_resolve_root_package_by_own_name() {
        let temp = project();
        let resolver = NodeModulesResolver::from_package_dir(temp.path()).unwrap();
        let location = resolver.resolve_location("app", "app").unwrap();
        assert_eq!(location, resolver.root());
    }

    #[test]
    fn test_resolve_dependency() {
        let temp = project();
        let resolver = NodeModulesResolver::from_package_dir(temp.path()).unwrap();
        let location = resolver.resolve_location("left-pad", "app").unwrap();
        assert!(location.ends_with("node_modules/left-pad"));
    }

    #[test]
    fn test_resolve_scoped_dependency() {
        let temp = project();
        let resolver = NodeModulesResolver::from_package_dir(temp.path()).unwrap();
        let location = resolver.resolve_location("@fontsource/inter", "app").unwrap();
        assert!(location.ends_with("node_modules/@fontsource/inter"));
    }

    #[test]
    fn test_nested_dependency_only_visible_to_its_issuer() {
        let temp = project();
        let resolver = NodeModulesResolver::from_package_dir(temp.path()).unwrap();

        assert!(resolver.resolve_location("nested", "app").is_err());
        let location = resolver.resolve_location("nested", "left-pad").unwrap();
        assert!(location.ends_with("left-pad/node_modules/nested"));
    }

    #[test]
    fn test_missing_package() {
        let temp = project();
        let resolver = NodeModulesResolver::from_package_dir(temp.path()).unwrap();
        match resolver.resolve_location("missing-lib", "app") {
            Err(VendorizeError::PackageNotFound { name, issuer }) => {
                assert_eq!(name, "missing-lib");
                assert_eq!(issuer, "app");
            }
            other => panic!("expected PackageNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_traversal_names_are_not_found() {
        let temp = project();
        let resolver = NodeModulesResolver::from_package_dir(temp.path()).unwrap();
        assert!(resolver.resolve_location("../left-pad", "app").is_err());
        assert!(resolver.resolve_location("", "app").is_err());
    }

    #[test]
    fn test_metadata() {
        let temp = project();
        let resolver = NodeModulesResolver::from_package_dir(temp.path()).unwrap();

        let left_pad = resolver.locate_owning_package("left-pad/index.js").unwrap();
        let metadata = resolver.metadata(&left_pad).unwrap().unwrap();
        assert_eq!(metadata.version.as_deref(), Some("1.0.0"));

        let inter = resolver
            .locate_owning_package("@fontsource/inter/files/inter.woff2")
            .unwrap();
        let metadata = resolver.metadata(&inter).unwrap().unwrap();
        assert_eq!(metadata.version, None);
    }

    #[test]
    fn test_metadata_without_manifest() {
        let temp = project();
        let resolver = NodeModulesResolver::from_package_dir(temp.path()).unwrap();
        let locator = PackageLocator::new("ghost", temp.path().join("nowhere"));
        assert_eq!(resolver.metadata(&locator).unwrap(), None);
    }

    #[test]
    fn test_owner_of_absolute_path() {
        let temp = project();
        let resolver = NodeModulesResolver::from_package_dir(temp.path()).unwrap();
        let asset = resolver
            .root()
            .join("node_modules/left-pad/fonts/icons.woff");

        let owner = resolver
            .locate_owning_package(asset.to_str().unwrap())
            .unwrap();
        assert_eq!(owner.name, "left-pad");
    }

    #[test]
    fn test_owner_of_relative_path_is_root_package() {
        let temp = project();
        let resolver = NodeModulesResolver::from_package_dir(temp.path()).unwrap();
        let owner = resolver.locate_owning_package("./styles/site.css").unwrap();
        assert_eq!(owner.name, "app");
    }

    #[test]
    fn test_owner_of_unknown_specifier() {
        let temp = project();
        let resolver = NodeModulesResolver::from_package_dir(temp.path()).unwrap();
        assert_eq!(resolver.locate_owning_package("unknown/x.css"), None);
    }
}
