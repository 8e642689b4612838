//! BLAKE3 content hashing for cache-busting tokens
//!
//! Hashes depend only on file contents, so an unchanged asset keeps the same
//! token across builds.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;

use crate::error::{self, Result};

/// Number of hex characters kept from the digest
pub const CONTENT_HASH_LEN: usize = 20;

/// Hash a byte slice into a short hex token
pub fn content_hash(bytes: &[u8]) -> String {
    let digest = blake3::hash(bytes).to_hex();
    digest.as_str()[..CONTENT_HASH_LEN].to_string()
}

/// Hash a file's contents into a short hex token
///
/// # Errors
///
/// Returns `FileReadFailed` if the file cannot be opened or read.
pub fn hash_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| error::fs::read_failed(path, &e))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| error::fs::read_failed(path, &e))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    let digest = hasher.finalize().to_hex();
    Ok(digest.as_str()[..CONTENT_HASH_LEN].to_string())
}
