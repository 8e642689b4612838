//! Filesystem build adapter
//!
//! Executes a [`CopyPlan`] directly on disk:
//! - runs the cleanup directive
//! - walks each package root in plan order (sorted, skipping nested
//!   `node_modules` and `.git`)
//! - copies every file to its expanded destination template
//! - rewrites each copied asset and records the result in
//!   `<vendor>/manifest.json`

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use super::{ASSET_MANIFEST_FILE, BuildAdapter, BuildReport, RewriteFn, cleanup};
use crate::error::{self, Result};
use crate::hash;
use crate::path_utils;
use crate::planner::{CopyOperation, CopyPlan, expand_template};
use crate::progress::CopyProgress;
use crate::rewriter::{AssetRequest, RewriteOutcome};

/// Directory names never copied out of a package
const EXCLUDED_DIRS: &[&str] = &["node_modules", ".git"];

/// A file found under a package root, waiting to be copied
struct SourceFile<'p> {
    operation: &'p CopyOperation,
    source: PathBuf,
    /// Path below the package root, forward slashes
    relative: String,
}

/// Build adapter writing straight to the filesystem
#[derive(Debug, Clone, Default)]
pub struct FsBuildAdapter {
    dry_run: bool,
    show_progress: bool,
}

impl FsBuildAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report what would happen without writing or deleting anything
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn collect_files<'p>(&self, plan: &'p CopyPlan) -> Result<Vec<SourceFile<'p>>> {
        let mut files = Vec::new();

        for operation in &plan.operations {
            let walker = WalkDir::new(&operation.from)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_excluded(e));

            for entry in walker {
                let entry = entry.map_err(|e| error::VendorizeError::FileReadFailed {
                    path: operation.from.display().to_string(),
                    reason: e.to_string(),
                })?;

                if !entry.file_type().is_file() {
                    continue;
                }

                let relative = entry
                    .path()
                    .strip_prefix(&operation.from)
                    .map(path_utils::to_forward_slashes)
                    .unwrap_or_default();

                files.push(SourceFile {
                    operation,
                    source: entry.into_path(),
                    relative,
                });
            }
        }

        Ok(files)
    }

    fn copy_file(&self, source: &Path, target: &Path) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| error::fs::write_failed(parent, &e))?;
        }
        std::fs::copy(source, target)
            .map(|_| ())
            .map_err(|e| error::fs::write_failed(target, &e))
    }

    fn write_manifest(&self, vendor_path: &Path, report: &BuildReport) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }

        let path = vendor_path.join(ASSET_MANIFEST_FILE);
        let json = serde_json::to_string_pretty(&report.manifest)?;
        std::fs::create_dir_all(vendor_path)
            .map_err(|e| error::fs::write_failed(vendor_path, &e))?;
        std::fs::write(&path, json + "\n").map_err(|e| error::fs::write_failed(&path, &e))
    }

    fn copy_all(
        &self,
        plan: &CopyPlan,
        files: &[SourceFile<'_>],
        rewrite: &RewriteFn<'_>,
        progress: &CopyProgress,
        report: &mut BuildReport,
    ) -> Result<()> {
        let mut hashed_packages = BTreeSet::new();

        for file in files {
            let operation = file.operation;
            let target_relative = expand_template(&operation.to, &file.relative);
            let target = plan.vendor_path.join(&target_relative);

            progress.update_file(&target_relative);
            self.copy_file(&file.source, &target)?;

            let request = path_utils::join_segments([
                operation.package.as_str(),
                file.relative.as_str(),
            ]);
            let content_hash = hash::hash_file(&file.source)?;
            let outcome = rewrite(&AssetRequest::new(request.clone(), content_hash));

            if let RewriteOutcome::Hashed { .. } = outcome {
                if hashed_packages.insert(operation.package.clone()) {
                    report.warnings.push(format!(
                        "Package '{}' declares no version, \
                         content hashes are used for cache busting",
                        operation.package
                    ));
                }
            }

            report.manifest.insert(request, outcome.into_path());
            report.copied.push(target);
        }

        Ok(())
    }
}

impl BuildAdapter for FsBuildAdapter {
    fn build(&self, plan: &CopyPlan, rewrite: &RewriteFn<'_>) -> Result<BuildReport> {
        let mut report = BuildReport::default();

        if let Some(directive) = &plan.cleanup {
            info!("Cleaning {}", directive);
            report.removed = cleanup::run(directive, self.dry_run)?;
        }

        let files = self.collect_files(plan)?;
        debug!(
            "Copying {} files from {} packages",
            files.len(),
            plan.operations.len()
        );

        let progress = CopyProgress::new(files.len() as u64, self.show_progress);
        if let Err(e) = self.copy_all(plan, &files, rewrite, &progress, &mut report) {
            progress.abandon();
            return Err(e);
        }
        progress.finish();

        self.write_manifest(&plan.vendor_path, &report)?;
        Ok(report)
    }
}

fn is_excluded(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{CleanupDirective, destination_template};
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn package(temp: &TempDir) -> PathBuf {
        let root = temp.path().join("store/left-pad");
        write(&root.join("package.json"), r#"{ "name": "left-pad" }"#);
        write(&root.join("index.js"), "module.exports = pad");
        write(&root.join("fonts/icons.woff"), "woff");
        write(&root.join("node_modules/dep/index.js"), "nested");
        root
    }

    fn plan(temp: &TempDir, from: PathBuf, clean: bool) -> CopyPlan {
        let vendor_path = temp.path().join("app/vendor");
        CopyPlan {
            cleanup: clean.then(|| CleanupDirective {
                root: vendor_path.clone(),
                pattern: "**".to_string(),
            }),
            vendor_path,
            operations: vec![CopyOperation {
                package: "left-pad".to_string(),
                from,
                to: destination_template("left-pad"),
            }],
        }
    }

    fn versioned(request: &AssetRequest) -> RewriteOutcome {
        RewriteOutcome::Versioned {
            path: format!("vendor/{}?v=1.0.0", request.original_request_path),
            version: "1.0.0".to_string(),
        }
    }

    #[test]
    fn test_build_copies_package_files() {
        let temp = TempDir::new().unwrap();
        let from = package(&temp);
        let plan = plan(&temp, from, true);

        let report = FsBuildAdapter::new().build(&plan, &versioned).unwrap();

        let vendor = &plan.vendor_path;
        assert!(vendor.join("left-pad/index.js").is_file());
        assert!(vendor.join("left-pad/fonts/icons.woff").is_file());
        assert!(vendor.join("left-pad/package.json").is_file());
        assert!(!vendor.join("left-pad/node_modules").exists());
        assert_eq!(report.copied.len(), 3);
        assert!(report.warnings.is_empty());
        assert_eq!(
            report.manifest.get("left-pad/index.js").map(String::as_str),
            Some("vendor/left-pad/index.js?v=1.0.0")
        );
    }

    #[test]
    fn test_build_writes_manifest() {
        let temp = TempDir::new().unwrap();
        let from = package(&temp);
        let plan = plan(&temp, from, true);

        FsBuildAdapter::new().build(&plan, &versioned).unwrap();

        let json = std::fs::read_to_string(plan.vendor_path.join(ASSET_MANIFEST_FILE)).unwrap();
        let manifest: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            manifest["left-pad/fonts/icons.woff"],
            "vendor/left-pad/fonts/icons.woff?v=1.0.0"
        );
    }

    #[test]
    fn test_build_cleans_before_copying() {
        let temp = TempDir::new().unwrap();
        let from = package(&temp);
        let plan = plan(&temp, from, true);
        write(&plan.vendor_path.join("stale/old.js"), "old");

        let report = FsBuildAdapter::new().build(&plan, &versioned).unwrap();

        assert!(!plan.vendor_path.join("stale").exists());
        assert!(report.removed.iter().any(|p| p.ends_with("stale/old.js")));
    }

    #[test]
    fn test_build_without_cleanup_keeps_stale_files() {
        let temp = TempDir::new().unwrap();
        let from = package(&temp);
        let plan = plan(&temp, from, false);
        write(&plan.vendor_path.join("stale/old.js"), "old");

        let report = FsBuildAdapter::new().build(&plan, &versioned).unwrap();

        assert!(plan.vendor_path.join("stale/old.js").exists());
        assert!(report.removed.is_empty());
    }

    #[test]
    fn test_build_passes_content_hash_and_warns() {
        let temp = TempDir::new().unwrap();
        let from = package(&temp);
        let plan = plan(&temp, from, true);

        let hashed = |request: &AssetRequest| RewriteOutcome::Hashed {
            path: format!("vendor/{}?v={}", request.original_request_path, request.content_hash),
            hash: request.content_hash.clone(),
        };
        let report = FsBuildAdapter::new().build(&plan, &hashed).unwrap();

        assert_eq!(report.warnings.len(), 1);
        let expected = format!(
            "vendor/left-pad/index.js?v={}",
            hash::content_hash(b"module.exports = pad")
        );
        assert_eq!(report.manifest["left-pad/index.js"], expected);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let from = package(&temp);
        let plan = plan(&temp, from, true);

        let report = FsBuildAdapter::new()
            .dry_run(true)
            .build(&plan, &versioned)
            .unwrap();

        assert_eq!(report.copied.len(), 3);
        assert!(!plan.vendor_path.exists());
    }

    #[test]
    fn test_missing_package_root_fails() {
        let temp = TempDir::new().unwrap();
        let plan = plan(&temp, temp.path().join("store/nowhere"), false);

        assert!(FsBuildAdapter::new().build(&plan, &versioned).is_err());
    }
}
