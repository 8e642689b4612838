//! The vendorize task: configuration plus a resolver
//!
//! [`Vendorize`] is what gets handed to a build adapter. It produces the copy
//! plan once, up front, and a rewriter for the asset references the build
//! meets afterwards.

use std::path::PathBuf;

use crate::build::{BuildAdapter, BuildReport};
use crate::config::Config;
use crate::error::Result;
use crate::planner::{self, CopyPlan};
use crate::resolver::{NODE_MODULES, PackageResolver};
use crate::rewriter::{AssetPathRewriter, AssetRequest};

#[derive(Debug)]
pub struct Vendorize<R> {
    config: Config,
    resolver: R,
}

impl<R: PackageResolver> Vendorize<R> {
    pub fn new(config: Config, resolver: R) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Configured vendor directory name
    pub fn vendor_dir_name(&self) -> &str {
        self.config.dir_name()
    }

    /// Absolute path of the package being vendored into
    ///
    /// # Errors
    ///
    /// Returns `PackageNotFound` if the resolver cannot locate the owning package.
    pub fn for_package_path(&self) -> Result<PathBuf> {
        let for_package = self.config.for_package();
        self.resolver.resolve_location(for_package, for_package)
    }

    /// Absolute path of the vendor directory
    ///
    /// # Errors
    ///
    /// Fails as [`Vendorize::for_package_path`] does.
    pub fn vendor_path(&self) -> Result<PathBuf> {
        Ok(self.for_package_path()?.join(self.vendor_dir_name()))
    }

    /// Plan the copy operations and pre-build cleanup
    ///
    /// # Errors
    ///
    /// Fails if the owning package or any configured package cannot be
    /// resolved, or if the vendor directory overlaps the owning package's
    /// `node_modules` or a package root.
    pub fn copy_plan(&self) -> Result<CopyPlan> {
        let for_package_path = self.for_package_path()?;
        let vendor_path = for_package_path.join(self.vendor_dir_name());
        planner::ensure_disjoint(&vendor_path, &for_package_path.join(NODE_MODULES))?;
        planner::plan(&self.config, &self.resolver, &vendor_path)
    }

    /// Rewriter for asset references met during the build
    pub fn rewriter(&self) -> AssetPathRewriter<'_, R> {
        AssetPathRewriter::new(&self.config, &self.resolver)
    }

    /// Plan, then hand the plan and the rewriter to `adapter`
    ///
    /// Planning completes before the adapter sees any asset, and a planning
    /// failure means nothing is cleaned or copied.
    ///
    /// # Errors
    ///
    /// Returns planning errors from [`Vendorize::copy_plan`] and whatever the
    /// adapter reports.
    pub fn build<A: BuildAdapter + ?Sized>(&self, adapter: &A) -> Result<BuildReport> {
        let plan = self.copy_plan()?;
        let rewriter = self.rewriter();
        adapter.build(&plan, &|request: &AssetRequest| rewriter.resolve(request))
    }

    /// Output path for a single asset reference
    pub fn asset_file_name(&self, request: &AssetRequest) -> String {
        self.rewriter().rewrite(request)
    }
}
