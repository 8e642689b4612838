//! Rewrite command implementation
//!
//! Prints the vendored path for a single asset request. Without `--hash` the
//! fallback hash is computed from the file the request points at.

use std::path::{Path, PathBuf};

use console::Style;

use crate::cli::RewriteArgs;
use crate::error::{Result, VendorizeError};
use crate::hash;
use crate::path_utils::{collapse_parent_segments, normalize_request, strip_query};
use crate::resolver::{PackageLocator, PackageResolver};
use crate::rewriter::{AssetRequest, RewriteOutcome};

/// Run rewrite command
///
/// # Errors
///
/// Fails on configuration errors, or with `FileNotFound` when the hash has to
/// be computed from a file that does not exist.
pub fn run(workspace: Option<PathBuf>, args: RewriteArgs) -> Result<()> {
    let vendorize = super::open_workspace(workspace)?.into_vendorize();
    let resolver = vendorize.resolver();

    let lookup = collapse_parent_segments(strip_query(&args.request));
    let owner = lookup.as_deref().and_then(|request| {
        resolver
            .locate_owning_package(request)
            .filter(|owner| vendorize.config().includes(&owner.name))
    });

    let content_hash = match (args.hash, lookup, owner) {
        (Some(hash), ..) => hash,
        (None, Some(lookup), Some(owner)) => {
            let source = source_file(resolver.root(), &owner, &lookup);
            if !source.is_file() {
                return Err(VendorizeError::FileNotFound {
                    path: source.display().to_string(),
                });
            }
            hash::hash_file(&source)?
        }
        // Not vendored: the request comes back unchanged and the hash is unused
        _ => String::new(),
    };

    let outcome = vendorize
        .rewriter()
        .resolve(&AssetRequest::new(args.request, content_hash));

    match &outcome {
        RewriteOutcome::Unchanged { path } => {
            println!("{}", path);
            eprintln!(
                "{}",
                Style::new()
                    .dim()
                    .apply_to("(not a vendored package, left unchanged)")
            );
        }
        RewriteOutcome::Versioned { path, .. } => println!("{}", path),
        RewriteOutcome::Hashed { path, .. } => {
            println!("{}", path);
            eprintln!(
                "{} package declares no version, content hash used",
                Style::new().yellow().bold().apply_to("warning:")
            );
        }
    }

    Ok(())
}

/// File on disk that `request` points at inside `owner`
fn source_file(root: &Path, owner: &PackageLocator, request: &str) -> PathBuf {
    let request = strip_query(request);

    if Path::new(request).is_absolute() {
        return PathBuf::from(request);
    }

    if request.starts_with("./") || request.starts_with("../") {
        return root.join(request);
    }

    let normalized = normalize_request(request);
    let relative = normalized
        .strip_prefix(owner.name.as_str())
        .unwrap_or(&normalized)
        .trim_start_matches('/');
    owner.location.join(relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> PackageLocator {
        PackageLocator::new("@fontsource/inter", "/app/node_modules/@fontsource/inter")
    }

    #[test]
    fn test_source_file_bare_specifier() {
        assert_eq!(
            source_file(Path::new("/app"), &owner(), "@fontsource/inter/files/a.woff2?v=3"),
            Path::new("/app/node_modules/@fontsource/inter/files/a.woff2")
        );
    }

    #[test]
    fn test_source_file_relative_to_root() {
        assert_eq!(
            source_file(Path::new("/app"), &owner(), "./node_modules/@fontsource/inter/a.css"),
            Path::new("/app/./node_modules/@fontsource/inter/a.css")
        );
    }

    #[test]
    fn test_source_file_absolute() {
        assert_eq!(
            source_file(
                Path::new("/app"),
                &owner(),
                "/app/node_modules/@fontsource/inter/a.css#top"
            ),
            Path::new("/app/node_modules/@fontsource/inter/a.css")
        );
    }
}
