//! ridgen CLI entry point
//!
//! This is the main executable for the runtime identifier graph
//! generator. It handles command-line argument parsing, error display,
//! and command execution.
//!
//! Commands:
//! - `generate` - Generate the runtime graph and write the configured artifacts
//! - `check` - Verify that the artifacts on disk are up to date
//! - `expand` - Print the full fallback chain of a runtime identifier

use anyhow::Result;
use clap::Parser;
use ridgen_cli::cli;
use ridgen_cli::core::error::user_friendly_error;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    // Execute the command
    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            // Convert to user-friendly error with context and suggestions
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
