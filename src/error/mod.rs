//! Error types and handling for vendorize
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration and manifest errors
//! - [`package`]: Package resolution errors
//! - [`fs`]: File system errors

pub mod config;
pub mod fs;
pub mod package;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for vendorize operations
#[derive(Error, Diagnostic, Debug)]
pub enum VendorizeError {
    // Configuration errors
    #[error("Invalid value for '{field}': {message}")]
    #[diagnostic(
        code(vendorize::config::validation),
        help("See the \"vendorize\" key of your package.json")
    )]
    ConfigValidation { field: String, message: String },

    #[error("Missing vendorize configuration for package '{package}': {reason}")]
    #[diagnostic(
        code(vendorize::config::missing),
        help(
            "Add a \"vendorize\" key to package.json, either an array of package names \
             or an object containing a \"packages\" key"
        )
    )]
    MissingConfiguration { package: String, reason: String },

    #[error("package.json not found at or above: {path}")]
    #[diagnostic(
        code(vendorize::config::manifest_not_found),
        help("Run vendorize from inside the package you want to vendor into")
    )]
    ManifestNotFound { path: String },

    #[error("Failed to parse package.json: {path}: {reason}")]
    #[diagnostic(code(vendorize::config::manifest_parse_failed))]
    ManifestParseFailed { path: String, reason: String },

    // Package resolution errors
    #[error("Package '{name}' could not be found from '{issuer}'")]
    #[diagnostic(
        code(vendorize::package::not_found),
        help("Check that the package is installed and listed as a dependency")
    )]
    PackageNotFound { name: String, issuer: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(vendorize::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(vendorize::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(vendorize::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to clean vendor directory '{path}': {reason}")]
    #[diagnostic(code(vendorize::fs::cleanup_failed))]
    CleanupFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(vendorize::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for VendorizeError {
    fn from(err: std::io::Error) -> Self {
        VendorizeError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for VendorizeError {
    fn from(err: serde_json::Error) -> Self {
        VendorizeError::ManifestParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, VendorizeError>;
