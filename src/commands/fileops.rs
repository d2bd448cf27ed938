//! # Fileops Command Implementation
//!
//! `fileops move` scans a source folder, filters files by extension and/or
//! substring, and moves the matches to one or more destination folders,
//! optionally renaming them on the way.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use jntool::fileops::{move_matching, Condition, MoveOptions, Rename};
use jntool::output::{OutputConfig, Status};

/// Arguments for the fileops command group
#[derive(Args, Debug)]
pub struct FileopsArgs {
    #[command(subcommand)]
    command: FileopsCommands,
}

#[derive(Subcommand, Debug)]
enum FileopsCommands {
    /// Scan a folder and move files by extension and/or substring match
    ///
    /// Filters the files of the source folder by extension and/or substring
    /// and moves the matches to one or more destination folders. Optionally
    /// renames during the move.
    Move(MoveArgs),
}

/// Arguments for `fileops move`
#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Source folder to scan
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub source: PathBuf,

    /// Destination folders (comma-separated)
    #[arg(short, long, value_name = "DIR", value_delimiter = ',', required = true)]
    pub dest: Vec<PathBuf>,

    /// File extensions to match (e.g. .pdf,.epub)
    #[arg(long, value_name = "EXT", value_delimiter = ',')]
    pub ext: Vec<String>,

    /// Substring to match in file name
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub substr: String,

    /// Filter condition: and|or
    #[arg(long, value_name = "COND", default_value = "or")]
    pub cond: Condition,

    /// Enable rename replace
    #[arg(short, long)]
    pub rename: bool,

    /// Substring to replace in file name
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub rename_from: String,

    /// Replacement substring
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub rename_to: String,
}

impl From<MoveArgs> for MoveOptions {
    fn from(args: MoveArgs) -> Self {
        let rename = (args.rename && !args.rename_from.is_empty()).then(|| Rename {
            from: args.rename_from,
            to: args.rename_to,
        });
        MoveOptions {
            source: args.source,
            destinations: args.dest,
            extensions: args.ext,
            substring: args.substr,
            condition: args.cond,
            rename,
        }
    }
}

/// Execute a `fileops` subcommand
pub fn execute(args: FileopsArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    match args.command {
        FileopsCommands::Move(args) => {
            let moved = move_matching(&args.into())?;
            log::info!("{} file placements", moved.len());
            println!("{}", out.line(Status::Done, "Move operation completed."));
            Ok(())
        }
    }
}
