//! Vendorize configuration
//!
//! A [`Config`] describes what to vendor: the packages to copy, the package
//! that owns the vendor directory, the vendor directory name, and whether the
//! vendor directory is emptied before copying.
//!
//! `Config` values are only produced through validation, either by
//! [`ConfigBuilder::build`] or by [`Config::from_section`] for the raw JSON
//! found under the `"vendorize"` key of a package.json. Once built they are
//! immutable.

pub mod manifest;

pub use manifest::{MANIFEST_FILE, PackageManifest};

use serde::Serialize;
use serde_json::Value;

use crate::error::{self, Result};

/// The package.json key containing vendorize configuration
pub const PACKAGE_KEY: &str = "vendorize";

/// Vendor directory name used when none is configured
pub const DEFAULT_DIR_NAME: &str = "vendor";

/// Validated vendorize configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    packages: Vec<String>,
    for_package: String,
    dir_name: String,
    clean_before: bool,
}

impl Config {
    /// Start building a configuration for the given owning package
    pub fn builder(for_package: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder::new(for_package)
    }

    /// Build a configuration from the value of a package.json `"vendorize"` key
    ///
    /// Accepts either an array of package names, or an object with a required
    /// `packages` array and optional `dir` (string) and `clean` (boolean) keys.
    ///
    /// # Errors
    ///
    /// Returns `MissingConfiguration` if the value has neither shape, and
    /// `ConfigValidation` if a field holds a value of the wrong type or is empty.
    pub fn from_section(for_package: &str, section: &Value) -> Result<Self> {
        let builder = ConfigBuilder::new(for_package);

        match section {
            Value::Array(_) => builder.packages(parse_packages(section)?).build(),
            Value::Object(map) => {
                let Some(packages) = map.get("packages") else {
                    return Err(shape_error(for_package));
                };

                let mut builder = builder.packages(parse_packages(packages)?);

                if let Some(dir) = map.get("dir") {
                    let dir = dir
                        .as_str()
                        .ok_or_else(|| error::config::validation("dir", "must be a string"))?;
                    builder = builder.dir_name(dir);
                }

                if let Some(clean) = map.get("clean") {
                    let clean = clean
                        .as_bool()
                        .ok_or_else(|| error::config::validation("clean", "must be a boolean"))?;
                    builder = builder.clean_before(clean);
                }

                builder.build()
            }
            _ => Err(shape_error(for_package)),
        }
    }

    /// Package names to vendor, in configured order
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// Name of the package that owns the vendor directory
    pub fn for_package(&self) -> &str {
        &self.for_package
    }

    /// Vendor directory name, relative to the owning package
    pub fn dir_name(&self) -> &str {
        &self.dir_name
    }

    /// Whether the vendor directory is emptied before copying
    pub fn clean_before(&self) -> bool {
        self.clean_before
    }

    /// Whether `name` is one of the configured packages
    pub fn includes(&self, name: &str) -> bool {
        self.packages.iter().any(|p| p == name)
    }
}

/// Builder for [`Config`]
///
/// Setters only record values; all checks run in [`ConfigBuilder::build`].
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    for_package: String,
    packages: Option<Vec<String>>,
    dir_name: String,
    clean_before: bool,
}

impl ConfigBuilder {
    /// Create a builder with the default directory name and cleaning enabled
    pub fn new(for_package: impl Into<String>) -> Self {
        Self {
            for_package: for_package.into(),
            packages: None,
            dir_name: DEFAULT_DIR_NAME.to_string(),
            clean_before: true,
        }
    }

    #[must_use]
    pub fn packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages = Some(packages.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn dir_name(mut self, dir_name: impl Into<String>) -> Self {
        self.dir_name = dir_name.into();
        self
    }

    #[must_use]
    pub fn clean_before(mut self, clean_before: bool) -> Self {
        self.clean_before = clean_before;
        self
    }

    /// Validate and produce the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidation` if the owning package name or directory name
    /// is empty, or if no package list was given.
    pub fn build(self) -> Result<Config> {
        if self.for_package.trim().is_empty() {
            return Err(error::config::validation(
                "forPackage",
                "must be a non-empty string",
            ));
        }

        if self.dir_name.trim().is_empty() {
            return Err(error::config::validation(
                "dir",
                "must be a non-empty string",
            ));
        }

        if !is_contained_dir(&self.dir_name) {
            return Err(error::config::validation(
                "dir",
                "must be a relative path inside the package, without '..' segments",
            ));
        }

        let Some(packages) = self.packages else {
            return Err(error::config::validation("packages", "must be set"));
        };

        Ok(Config {
            packages,
            for_package: self.for_package,
            dir_name: self.dir_name,
            clean_before: self.clean_before,
        })
    }
}

/// The vendor directory gets emptied before copies, so it must stay strictly
/// below the owning package
fn is_contained_dir(dir_name: &str) -> bool {
    let normalized = dir_name.replace('\\', "/");
    if normalized.starts_with('/') || normalized.contains(':') {
        return false;
    }

    let mut segments = normalized
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .peekable();
    segments.peek().is_some() && segments.all(|s| s != "..")
}

fn parse_packages(value: &Value) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| error::config::validation("packages", "must be an array"))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                error::config::validation(
                    format!("packages[{i}]"),
                    "package names must be strings",
                )
            })
        })
        .collect()
}

fn shape_error(for_package: &str) -> crate::error::VendorizeError {
    error::config::missing(
        for_package,
        format!(
            "'{PACKAGE_KEY}' must either be an array or an object containing a \"packages\" key"
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VendorizeError;
    use serde_json::json;

    fn assert_validation_error(result: Result<Config>, expected_field: &str) {
        match result {
            Err(VendorizeError::ConfigValidation { field, .. }) => {
                assert_eq!(field, expected_field);
            }
            other => panic!("expected ConfigValidation for {expected_field}, got {other:?}"),
        }
    }

    #[test]
    fn test_builder_defaults() {
        let config = Config::builder("app")
            .packages(["left-pad"])
            .build()
            .unwrap();

        assert_eq!(config.for_package(), "app");
        assert_eq!(config.packages(), ["left-pad".to_string()]);
        assert_eq!(config.dir_name(), "vendor");
        assert!(config.clean_before());
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::builder("app")
            .packages(["a", "b"])
            .dir_name("public/vendor")
            .clean_before(false)
            .build()
            .unwrap();

        assert_eq!(config.dir_name(), "public/vendor");
        assert!(!config.clean_before());
        assert!(config.includes("b"));
        assert!(!config.includes("c"));
    }

    #[test]
    fn test_builder_rejects_empty_for_package() {
        assert_validation_error(
            Config::builder("").packages(["a"]).build(),
            "forPackage",
        );
    }

    #[test]
    fn test_builder_rejects_empty_dir_name() {
        assert_validation_error(
            Config::builder("app").packages(["a"]).dir_name("").build(),
            "dir",
        );
    }

    #[test]
    fn test_builder_rejects_escaping_dir_name() {
        for dir in ["..", "../shared", "assets/../../x", "/var/www", ".", "./"] {
            assert_validation_error(
                Config::builder("app").packages(["a"]).dir_name(dir).build(),
                "dir",
            );
        }
    }

    #[test]
    fn test_builder_requires_packages() {
        assert_validation_error(Config::builder("app").build(), "packages");
    }

    #[test]
    fn test_builder_allows_empty_package_list() {
        let config = Config::builder("app")
            .packages(Vec::<String>::new())
            .build()
            .unwrap();
        assert!(config.packages().is_empty());
    }

    #[test]
    fn test_builder_keeps_duplicates_in_order() {
        let config = Config::builder("app")
            .packages(["b", "a", "b"])
            .build()
            .unwrap();
        assert_eq!(config.packages(), ["b", "a", "b"]);
    }

    #[test]
    fn test_from_section_array() {
        let config = Config::from_section("app", &json!(["left-pad", "@scope/pkg"])).unwrap();
        assert_eq!(config.packages(), ["left-pad", "@scope/pkg"]);
        assert_eq!(config.dir_name(), DEFAULT_DIR_NAME);
        assert!(config.clean_before());
    }

    #[test]
    fn test_from_section_object() {
        let section = json!({
            "packages": ["left-pad"],
            "dir": "assets/vendor",
            "clean": false
        });
        let config = Config::from_section("app", &section).unwrap();
        assert_eq!(config.dir_name(), "assets/vendor");
        assert!(!config.clean_before());
    }

    #[test]
    fn test_from_section_rejects_string_clean() {
        let section = json!({ "packages": ["left-pad"], "clean": "true" });
        assert_validation_error(Config::from_section("app", &section), "clean");
    }

    #[test]
    fn test_from_section_rejects_non_string_dir() {
        let section = json!({ "packages": ["left-pad"], "dir": 42 });
        assert_validation_error(Config::from_section("app", &section), "dir");
    }

    #[test]
    fn test_from_section_rejects_empty_dir() {
        let section = json!({ "packages": ["left-pad"], "dir": "" });
        assert_validation_error(Config::from_section("app", &section), "dir");
    }

    #[test]
    fn test_from_section_rejects_non_array_packages() {
        let section = json!({ "packages": "left-pad" });
        assert_validation_error(Config::from_section("app", &section), "packages");
    }

    #[test]
    fn test_from_section_rejects_non_string_package_entry() {
        assert_validation_error(
            Config::from_section("app", &json!(["left-pad", 3])),
            "packages[1]",
        );
    }

    #[test]
    fn test_from_section_object_without_packages() {
        let result = Config::from_section("app", &json!({ "dir": "vendor" }));
        assert!(matches!(
            result,
            Err(VendorizeError::MissingConfiguration { .. })
        ));
    }

    #[test]
    fn test_from_section_wrong_shape() {
        for section in [json!("left-pad"), json!(true), json!(null), json!(1)] {
            let result = Config::from_section("app", &section);
            assert!(
                matches!(result, Err(VendorizeError::MissingConfiguration { .. })),
                "section {section} should be rejected"
            );
        }
    }
}
