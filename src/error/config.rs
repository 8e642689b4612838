//! Configuration errors

use super::VendorizeError;

/// Creates a config validation error for a single field
pub fn validation(field: impl Into<String>, message: impl Into<String>) -> VendorizeError {
    VendorizeError::ConfigValidation {
        field: field.into(),
        message: message.into(),
    }
}

/// Creates a missing configuration error
pub fn missing(package: impl Into<String>, reason: impl Into<String>) -> VendorizeError {
    VendorizeError::MissingConfiguration {
        package: package.into(),
        reason: reason.into(),
    }
}

/// Creates a manifest parse failed error
pub fn manifest_parse_failed(path: impl Into<String>, reason: impl Into<String>) -> VendorizeError {
    VendorizeError::ManifestParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
