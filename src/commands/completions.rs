//! Shell completion generation

use std::io::Write;

use clap::CommandFactory;

use crate::cli::{Cli, CompletionsArgs};
use crate::error::Result;

/// Run completions command
///
/// # Errors
///
/// Fails if the script cannot be written to stdout.
pub fn run(args: CompletionsArgs) -> Result<()> {
    write_completions(args, &mut std::io::stdout().lock())
}

fn write_completions(args: CompletionsArgs, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "vendorize", out);
    out.flush()?;
    Ok(())
}
