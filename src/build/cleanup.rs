//! Pre-build cleanup of the vendor directory
//!
//! Entries below the directive's root are matched against its glob with wax.
//! The root directory itself is never removed.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::error::{self, Result};
use crate::path_utils;
use crate::planner::CleanupDirective;

/// Remove everything under the directive's root matched by its pattern
///
/// Returns the removed paths, deepest first. With `dry_run` nothing is
/// deleted and the paths that would be removed are returned.
///
/// # Errors
///
/// Returns `CleanupFailed` if the pattern is not a valid glob, or if an entry
/// cannot be listed or removed.
pub fn run(directive: &CleanupDirective, dry_run: bool) -> Result<Vec<PathBuf>> {
    let root = &directive.root;
    let glob = Glob::new(&directive.pattern)
        .map_err(|e| error::fs::cleanup_failed(root, e.to_string()))?;

    if !root.is_dir() {
        debug!("Nothing to clean, {} does not exist", root.display());
        return Ok(Vec::new());
    }

    let mut removed = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).contents_first(true) {
        let entry = entry.map_err(|e| error::fs::cleanup_failed(root, e.to_string()))?;
        let path = entry.path();

        let relative = path_utils::to_forward_slashes(path.strip_prefix(root).unwrap_or(path));
        if glob.matched(&CandidatePath::from(relative.as_str())).is_none() {
            continue;
        }

        if entry.file_type().is_dir() {
            if !dry_run && !remove_empty_dir(path)? {
                continue;
            }
        } else if !dry_run {
            std::fs::remove_file(path)
                .map_err(|e| error::fs::cleanup_failed(path, e.to_string()))?;
        }

        removed.push(path.to_path_buf());
    }

    debug!("Removed {} entries from {}", removed.len(), root.display());
    Ok(removed)
}

/// Directories that still hold unmatched entries are kept
fn remove_empty_dir(path: &Path) -> Result<bool> {
    let mut entries =
        std::fs::read_dir(path).map_err(|e| error::fs::cleanup_failed(path, e.to_string()))?;
    if entries.next().is_some() {
        return Ok(false);
    }

    std::fs::remove_dir(path).map_err(|e| error::fs::cleanup_failed(path, e.to_string()))?;
    Ok(true)
}
