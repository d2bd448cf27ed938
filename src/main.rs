//! # jntool CLI
//!
//! This is the binary entry point for the `jntool` command-line toolbox.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and output preferences.
//! - Executing the appropriate command based on the parsed arguments.
//! - Handling top-level errors: any error is printed to stderr and the
//!   process exits with status 1.
//!
//! The workflows themselves live in the `jntool` library crate, so the binary
//! stays a thin wrapper around reusable functionality.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
