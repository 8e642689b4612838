//! File system errors

use std::path::Path;

use super::VendorizeError;

/// Creates a file read failed error
pub fn read_failed(path: &Path, e: &std::io::Error) -> VendorizeError {
    VendorizeError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: &Path, e: &std::io::Error) -> VendorizeError {
    VendorizeError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Creates a vendor directory cleanup error
pub fn cleanup_failed(path: &Path, reason: impl Into<String>) -> VendorizeError {
    VendorizeError::CleanupFailed {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}
