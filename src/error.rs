//! # Error Handling
//!
//! This module defines the centralized error type for the `jntool` library.
//! It uses the `thiserror` library to create an `Error` enum covering every
//! anticipated failure mode of the chart-values workflow and the file mover.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant carries enough context (which
//!   file, which operation) to explain the failure without a backtrace.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The variants map onto the failure kinds of the workflow:
//!
//! - I/O failures while reading, writing or copying files.
//! - Validation failures when substituted text no longer parses as YAML.
//! - Malformed `variables.json` documents.
//! - Missing numbered backups.
//! - Unsupported output formats.
//! - Failures reported by the external chart installer.
//! - Values documents that cannot be merged.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Main error type for jntool operations
#[derive(Error, Debug)]
pub enum Error {
    /// A filesystem operation failed.
    ///
    /// `operation` names the step (for example `"snapshot default"`) and
    /// `path` the file that was being touched.
    #[error("I/O error during {operation} on {}: {source}", path.display())]
    Io {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Text produced by placeholder substitution is not well-formed YAML.
    #[error("Invalid YAML in {file} after replacement: {message}")]
    Validation { file: String, message: String },

    /// The variables document could not be parsed into a flat string map.
    #[error("Invalid variables document {}: {message}", path.display())]
    VariablesParse { path: PathBuf, message: String },

    /// A required file, typically a numbered backup, does not exist.
    #[error("Not found: {what}")]
    NotFound { what: String },

    /// The highest numbered backup of `name` already uses the largest
    /// representable number, so no further backup can be numbered.
    #[error("Backup numbers exhausted for {name} in {}", dir.display())]
    BackupNumbersExhausted { name: String, dir: PathBuf },

    /// The requested output format is not one of the supported formats.
    #[error("Unsupported output format: {format}")]
    UnsupportedFormat { format: String },

    /// The chart installer reported a failure.
    #[error("Install of release {release} failed: {message}")]
    ExternalInstall { release: String, message: String },

    /// Two values documents could not be merged.
    #[error("Merge error: {message}")]
    Merge { message: String },

    /// A YAML serialization error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Builds a closure that wraps an `io::Error` with the operation and path
    /// it happened on, for use with `map_err`.
    pub fn io<'a>(
        operation: &'a str,
        path: &'a Path,
    ) -> impl FnOnce(std::io::Error) -> Error + 'a {
        move |source| Error::Io {
            operation: operation.to_string(),
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
