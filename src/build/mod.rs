//! Build adapters
//!
//! A [`BuildAdapter`] is the engine that actually touches the filesystem: it
//! runs the cleanup directive, executes the copy plan in order, and calls the
//! rewrite callback for every asset it emits. The vendorize core only hands
//! it a plan and a callback.

pub mod cleanup;
pub mod fs;

pub use fs::FsBuildAdapter;

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::planner::CopyPlan;
use crate::rewriter::{AssetRequest, RewriteOutcome};

/// Per-asset rewrite callback handed to a build adapter
pub type RewriteFn<'a> = dyn Fn(&AssetRequest) -> RewriteOutcome + Sync + 'a;

/// File name of the asset manifest written into the vendor directory
pub const ASSET_MANIFEST_FILE: &str = "manifest.json";

/// What a build did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Paths removed by the cleanup directive
    pub removed: Vec<PathBuf>,
    /// Files written into the vendor directory
    pub copied: Vec<PathBuf>,
    /// Asset request -> rewritten output path
    pub manifest: BTreeMap<String, String>,
    /// Non-fatal problems worth showing to the operator
    pub warnings: Vec<String>,
}

/// An engine that executes copy plans
pub trait BuildAdapter {
    /// Run `plan`, calling `rewrite` once per emitted asset
    ///
    /// The cleanup directive, when present, must complete before the first
    /// copy operation starts, and operations run in plan order.
    fn build(&self, plan: &CopyPlan, rewrite: &RewriteFn<'_>) -> Result<BuildReport>;
}
