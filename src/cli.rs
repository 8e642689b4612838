//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vendorize - copy node packages into a vendor directory
#[derive(Parser, Debug)]
#[command(
    name = "vendorize",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Copy node packages into a vendor directory with cache-busted asset paths",
    long_about = "vendorize copies the packages listed under the \"vendorize\" key of your \
                  package.json out of node_modules into a vendor directory, and records \
                  versioned asset paths (?v=<version or content hash>) for every copied file.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  vendorize\n    \
                  vendorize build --dry-run\n    \
                  vendorize plan --json\n    \
                  vendorize rewrite left-pad/index.js\n\n\
                  \x1b[1m\x1b[32mConfiguration (package.json):\x1b[0m\n    \
                  \"vendorize\": [\"left-pad\"]\n    \
                  \"vendorize\": { \"packages\": [\"left-pad\"], \
                  \"dir\": \"vendor\", \"clean\": true }"
)]
pub struct Cli {
    /// Package directory (defaults to the nearest package.json above the current directory)
    #[arg(long, short = 'w', global = true, env = "VENDORIZE_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Defaults to `build` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean the vendor directory and copy the configured packages into it
    Build(BuildArgs),

    /// Show the copy plan without touching the filesystem
    Plan(PlanArgs),

    /// Show the vendored path for an asset request
    Rewrite(RewriteArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the build command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                  Vendor the configured packages:\n    vendorize build\n\n\
                  Show what would be cleaned and copied:\n    vendorize build --dry-run")]
pub struct BuildArgs {
    /// Report what would be cleaned and copied without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the plan command
#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the rewrite command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Rewrite using the package version:\n    vendorize rewrite left-pad/index.js\n\n\
                  Rewrite with an explicit content hash:\n    \
                  vendorize rewrite @fontsource/inter/index.css --hash abc123")]
pub struct RewriteArgs {
    /// Asset request as written in source code
    pub request: String,

    /// Content hash to fall back to (defaults to a hash of the resolved file)
    #[arg(long)]
    pub hash: Option<String>,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    \
                  vendorize completions --shell bash > ~/.bash_completion.d/vendorize\n\n\
                  Generate zsh completions:\n    \
                  vendorize completions --shell zsh > ~/.zfunc/_vendorize")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(long, value_enum)]
    pub shell: clap_complete::Shell,
}
