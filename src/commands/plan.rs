//! Plan command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::PlanArgs;
use crate::error::Result;
use crate::planner::CopyPlan;

/// Run plan command
///
/// # Errors
///
/// Fails on configuration or planning errors.
pub fn run(workspace: Option<PathBuf>, args: PlanArgs) -> Result<()> {
    let vendorize = super::open_workspace(workspace)?.into_vendorize();
    let plan = vendorize.copy_plan()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }

    Ok(())
}

fn print_plan(plan: &CopyPlan) {
    println!(
        "{} {}",
        Style::new().bold().apply_to("Vendor directory:"),
        plan.vendor_path.display()
    );

    match &plan.cleanup {
        Some(directive) => println!(
            "{} {}",
            Style::new().bold().apply_to("Clean:"),
            Style::new().red().apply_to(directive)
        ),
        None => println!(
            "{} {}",
            Style::new().bold().apply_to("Clean:"),
            Style::new().dim().apply_to("disabled")
        ),
    }

    if plan.operations.is_empty() {
        println!("{}", Style::new().dim().apply_to("No packages to vendor"));
        return;
    }

    println!("{}", Style::new().bold().apply_to("Packages:"));
    for operation in &plan.operations {
        println!(
            "  {}",
            Style::new().bold().yellow().apply_to(&operation.package)
        );
        println!("    from: {}", operation.from.display());
        println!("    to:   {}", Style::new().cyan().apply_to(&operation.to));
    }
}
