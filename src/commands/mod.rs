//! Command implementations for vendorize CLI

pub mod build;
pub mod completions;
pub mod plan;
pub mod rewrite;
pub mod version;

use std::path::PathBuf;

use crate::error::Result;
use crate::workspace::Workspace;

/// Open the package named by `--workspace`, or the one containing the current directory
fn open_workspace(workspace: Option<PathBuf>) -> Result<Workspace> {
    match workspace {
        Some(root) => Workspace::open(&root),
        None => Workspace::discover(&std::env::current_dir()?),
    }
}
