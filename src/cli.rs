//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// jntool - a command-line toolbox for Helm values files and file moves
#[derive(Parser, Debug)]
#[command(name = "jntool")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace) or an env_logger filter
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn",
        env = "JNTOOL_LOG"
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract, apply and install Helm chart values
    Helm(commands::helm::HelmArgs),

    /// File operations
    Fileops(commands::fileops::FileopsArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp(None)
            .try_init()?;

        match self.command {
            Commands::Helm(args) => commands::helm::execute(args, &self.color),
            Commands::Fileops(args) => commands::fileops::execute(args, &self.color),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
