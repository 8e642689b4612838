//! vendorize - copy node packages into a vendor directory
//!
//! Reads the `"vendorize"` key of the nearest package.json, copies the listed
//! packages out of `node_modules` and records cache-busted asset paths.

use clap::Parser;

use vendorize::cli::{BuildArgs, Cli, Commands};
use vendorize::{commands, logging};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        None => commands::build::run(cli.workspace, BuildArgs::default()),
        Some(Commands::Build(args)) => commands::build::run(cli.workspace, args),
        Some(Commands::Plan(args)) => commands::plan::run(cli.workspace, args),
        Some(Commands::Rewrite(args)) => commands::rewrite::run(cli.workspace, args),
        Some(Commands::Version) => commands::version::run(),
        Some(Commands::Completions(args)) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
