//! # Output Configuration
//!
//! Controls how status lines printed by the CLI look. When colours are
//! enabled, status lines are prefixed with an emoji; otherwise with a plain
//! bracketed tag, which keeps output readable in logs and pipes.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust
//! use jntool::output::{OutputConfig, Status};
//!
//! let config = OutputConfig::from_env_and_flag("never");
//! assert_eq!(config.line(Status::Done, "Completed apply-vars"), "[OK] Completed apply-vars");
//! ```

use std::env;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

/// Kinds of status line printed by the commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A command finished successfully
    Done,
    /// A file was written
    Wrote,
    /// Something the user should look at, without failing the command
    Warning,
    /// Dry run notice
    DryRun,
}

impl Status {
    fn markers(self) -> (&'static str, &'static str) {
        match self {
            Status::Done => ("✅", "[OK]"),
            Status::Wrote => ("💾", "[WROTE]"),
            Status::Warning => ("⚠️", "[WARN]"),
            Status::DryRun => ("🔎", "[DRY RUN]"),
        }
    }
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `color_flag` is the value of `--color`: `always` forces colors on
    /// (overriding `NO_COLOR`), `never` forces them off, anything else
    /// detects support from the environment and the terminal.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// The prefix for `status` under this configuration.
    pub fn marker(&self, status: Status) -> &'static str {
        let (emoji, plain) = status.markers();
        if self.use_color {
            emoji
        } else {
            plain
        }
    }

    /// A full status line: marker, a space, then `message`.
    pub fn line(&self, status: Status, message: &str) -> String {
        format!("{} {}", self.marker(status), message)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
