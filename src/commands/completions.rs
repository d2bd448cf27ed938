//! # Completions Command Implementation
//!
//! Generates shell completion scripts with `clap_complete` so every `jntool`
//! command and option can be tab-completed.
//!
//! ## Example
//!
//! ```bash
//! jntool completions bash > ~/.local/share/bash-completion/completions/jntool
//! jntool completions zsh > ~/.zfunc/_jntool
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command, writing the script to stdout.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "jntool", &mut io::stdout());
    Ok(())
}
