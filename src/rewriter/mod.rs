//! Asset path rewriting
//!
//! The build adapter calls [`AssetPathRewriter::rewrite`] once for every asset
//! reference it meets while walking the module graph. Assets owned by a
//! vendored package are pointed into the vendor directory and given a
//! `?v=<token>` cache-busting suffix; everything else passes through unchanged.
//!
//! The token is the owning package's declared version. When the package
//! declares none, or the resolver cannot provide its metadata at all, the
//! module's content hash supplied by the build adapter is used instead.
//!
//! Rewriting does no I/O of its own beyond read-only resolver lookups and
//! holds no mutable state, so one rewriter can serve concurrent callers.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::path_utils::{
    collapse_parent_segments, join_segments, normalize_request, split_request, strip_query,
    to_forward_slashes,
};
use crate::resolver::{PackageLocator, PackageResolver};

/// One asset reference encountered by the build adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRequest {
    /// The request exactly as written in source, before resolution
    pub original_request_path: String,
    /// Content hash of the module the asset resolved to
    pub content_hash: String,
}

impl AssetRequest {
    pub fn new(original_request_path: impl Into<String>, content_hash: impl Into<String>) -> Self {
        Self {
            original_request_path: original_request_path.into(),
            content_hash: content_hash.into(),
        }
    }
}

/// How an asset request was rewritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RewriteOutcome {
    /// Not owned by a vendored package; the original request is kept
    Unchanged { path: String },
    /// Suffixed with the package's declared version
    Versioned { path: String, version: String },
    /// Suffixed with the content hash because no version was available
    Hashed { path: String, hash: String },
}

impl RewriteOutcome {
    pub fn path(&self) -> &str {
        match self {
            Self::Unchanged { path } | Self::Versioned { path, .. } | Self::Hashed { path, .. } => {
                path
            }
        }
    }

    pub fn into_path(self) -> String {
        match self {
            Self::Unchanged { path } | Self::Versioned { path, .. } | Self::Hashed { path, .. } => {
                path
            }
        }
    }

    /// Whether the request was moved into the vendor directory
    pub fn is_rewritten(&self) -> bool {
        !matches!(self, Self::Unchanged { .. })
    }
}

/// Computes vendored, cache-busted output paths for asset requests
#[derive(Debug)]
pub struct AssetPathRewriter<'a, R: ?Sized> {
    config: &'a Config,
    resolver: &'a R,
}

impl<'a, R> AssetPathRewriter<'a, R>
where
    R: PackageResolver + ?Sized,
{
    pub fn new(config: &'a Config, resolver: &'a R) -> Self {
        Self { config, resolver }
    }

    /// Rewrite a request, returning the path the build should emit
    pub fn rewrite(&self, request: &AssetRequest) -> String {
        self.resolve(request).into_path()
    }

    /// Rewrite a request, reporting how the result was derived
    pub fn resolve(&self, request: &AssetRequest) -> RewriteOutcome {
        let original = &request.original_request_path;
        let unchanged = || RewriteOutcome::Unchanged {
            path: original.clone(),
        };

        // `..` is resolved first so ownership reflects the file actually pointed at
        let Some(collapsed) = collapse_parent_segments(strip_query(original)) else {
            return unchanged();
        };
        let Some(owner) = self.vendored_owner(&collapsed) else {
            return unchanged();
        };

        let vendored = normalize_request(&self.package_relative(&collapsed, &owner));
        let parts = split_request(&vendored);
        let file = format!("{}{}", parts.name, parts.ext);
        let dir_name = self.config.dir_name().trim_end_matches('/');
        let base = join_segments([dir_name, parts.dir, file.as_str()]);

        match self.declared_version(&owner) {
            Some(version) => RewriteOutcome::Versioned {
                path: format!("{base}?v={version}"),
                version,
            },
            None => {
                debug!(
                    "No version declared by {}, using content hash for {}",
                    owner.name, original
                );
                RewriteOutcome::Hashed {
                    path: format!("{base}?v={}", request.content_hash),
                    hash: request.content_hash.clone(),
                }
            }
        }
    }

    fn vendored_owner(&self, request: &str) -> Option<PackageLocator> {
        self.resolver
            .locate_owning_package(request)
            .filter(|owner| self.config.includes(&owner.name))
    }

    /// Requests given as a filesystem path, absolute or relative to the
    /// owning package, are re-rooted at `<package>/` to mirror the vendor layout
    fn package_relative(&self, request: &str, owner: &PackageLocator) -> String {
        let absolute = if Path::new(request).is_absolute() {
            Some(request.to_string())
        } else if request.starts_with("./") || request.starts_with("../") {
            let for_package = self.config.for_package();
            self.resolver
                .resolve_location(for_package, for_package)
                .ok()
                .and_then(|root| {
                    collapse_parent_segments(&format!("{}/{request}", to_forward_slashes(&root)))
                })
        } else {
            None
        };

        let Some(absolute) = absolute else {
            return request.to_string();
        };

        match Path::new(&absolute).strip_prefix(&owner.location) {
            Ok(relative) => join_segments([
                owner.name.as_str(),
                to_forward_slashes(relative).as_str(),
            ]),
            Err(_) => request.to_string(),
        }
    }

    fn declared_version(&self, owner: &PackageLocator) -> Option<String> {
        match self.resolver.metadata(owner) {
            Ok(metadata) => metadata.and_then(|m| m.version),
            Err(e) => {
                warn!("Could not read metadata of {}: {}", owner.name, e);
                None
            }
        }
    }
}
