//! vendorize - copy node packages into a vendor directory
//!
//! The library side holds everything the `vendorize` binary does, so that a
//! build tool can embed it directly:
//! - [`Config`] is read from the `"vendorize"` key of a package.json
//! - a [`PackageResolver`] answers where packages live and what they declare
//! - [`Vendorize::copy_plan`] turns both into a [`CopyPlan`]
//! - [`AssetPathRewriter`] maps asset requests to cache-busted vendor paths
//! - a [`BuildAdapter`] executes the plan, [`FsBuildAdapter`] on plain disk
//!
//! ```
//! use vendorize::{AssetRequest, Config, MemoryResolver, Vendorize};
//!
//! let config = Config::builder("app").packages(["left-pad"]).build()?;
//! let resolver = MemoryResolver::new()
//!     .with_package("app", "/work/app", None)
//!     .with_package("left-pad", "/store/left-pad@1.0.0", Some("1.0.0"));
//! let vendorize = Vendorize::new(config, resolver);
//!
//! let path = vendorize.asset_file_name(&AssetRequest::new("left-pad/index.js", "abc123"));
//! assert_eq!(path, "vendor/left-pad/index.js?v=1.0.0");
//! # Ok::<(), vendorize::VendorizeError>(())
//! ```

pub mod build;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod hash;
pub mod logging;
pub mod path_utils;
pub mod planner;
pub mod progress;
pub mod resolver;
pub mod rewriter;
pub mod vendor;
pub mod workspace;

pub use build::{BuildAdapter, BuildReport, FsBuildAdapter, RewriteFn};
pub use config::{Config, ConfigBuilder};
pub use error::{Result, VendorizeError};
pub use planner::{CleanupDirective, CopyOperation, CopyPlan};
pub use resolver::{
    MemoryResolver, NodeModulesResolver, PackageLocator, PackageMetadata, PackageResolver,
};
pub use rewriter::{AssetPathRewriter, AssetRequest, RewriteOutcome};
pub use vendor::Vendorize;
pub use workspace::Workspace;
