//! Version command implementation

use crate::error::Result;

/// Run version command
///
/// # Errors
///
/// Never fails; returns `Result` to match the other commands.
pub fn run() -> Result<()> {
    println!("vendorize {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("  Profile: {}", build_profile());

    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
