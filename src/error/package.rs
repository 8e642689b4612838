//! Package resolution errors

use super::VendorizeError;

/// Creates a package not found error
pub fn not_found(name: impl Into<String>, issuer: impl Into<String>) -> VendorizeError {
    VendorizeError::PackageNotFound {
        name: name.into(),
        issuer: issuer.into(),
    }
}
