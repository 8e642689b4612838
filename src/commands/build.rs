//! Build command implementation
//!
//! Cleans the vendor directory, copies every configured package into it and
//! writes the asset manifest. With `--dry-run` only the report is printed.

use std::path::{Path, PathBuf};

use console::Style;
use crate::build::{ASSET_MANIFEST_FILE, BuildReport, FsBuildAdapter};
use crate::cli::BuildArgs;
use crate::error::Result;

/// Run build command
///
/// # Errors
///
/// Fails on configuration, planning, or filesystem errors.
pub fn run(workspace: Option<PathBuf>, args: BuildArgs) -> Result<()> {
    let workspace = super::open_workspace(workspace)?;
    let root = workspace.root.clone();
    let vendorize = workspace.into_vendorize();

    let adapter = FsBuildAdapter::new()
        .dry_run(args.dry_run)
        .show_progress(!args.dry_run && console::Term::stderr().is_term());
    let report = vendorize.build(&adapter)?;

    for warning in &report.warnings {
        eprintln!("{} {}", Style::new().yellow().bold().apply_to("warning:"), warning);
    }

    print_summary(&root, &vendorize.vendor_path()?, &report, args.dry_run);
    Ok(())
}

fn print_summary(root: &Path, vendor_path: &Path, report: &BuildReport, dry_run: bool) {
    let vendor_display = vendor_path
        .strip_prefix(root)
        .unwrap_or(vendor_path)
        .display()
        .to_string();

    if dry_run {
        println!(
            "{} would remove {} entries and copy {} files into {}",
            Style::new().cyan().bold().apply_to("Dry run:"),
            report.removed.len(),
            report.copied.len(),
            vendor_display
        );
        for path in &report.removed {
            println!("  {} {}", Style::new().red().apply_to("-"), path.display());
        }
        for path in &report.copied {
            println!("  {} {}", Style::new().green().apply_to("+"), path.display());
        }
        return;
    }

    println!(
        "{} {} files into {} ({} written)",
        Style::new().green().bold().apply_to("Vendored"),
        report.copied.len(),
        vendor_display,
        ASSET_MANIFEST_FILE
    );
    if !report.removed.is_empty() {
        println!(
            "  {}",
            Style::new()
                .dim()
                .apply_to(format!("{} stale entries removed", report.removed.len()))
        );
    }
}
