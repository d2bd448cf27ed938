//! Shared test utilities for integration and E2E tests.
//!
//! This module provides chart fixtures and helpers to reduce duplication
//! across test files.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_chart(charts::VALUES, charts::VALUES_TAG, charts::VARIABLES);
//!     fixture.command().args(["helm", "apply-vars", "."]).assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::charts;
    pub use super::TestFixture;
}

/// Common chart file contents for testing.
#[allow(dead_code)]
pub mod charts {
    /// values.yaml with two placeholders.
    pub const VALUES: &str = "name: @{APP_NAME}\nreplicas: 2\nimage:\n  repository: registry/@{APP_NAME}\n";

    /// values-tag.yaml with one placeholder.
    pub const VALUES_TAG: &str = "image:\n  tag: \"@{TAG}\"\n";

    /// variables.json covering every placeholder above.
    pub const VARIABLES: &str = r#"{"APP_NAME": "demo", "TAG": "v1.2.3"}"#;

    /// A value that breaks YAML structure when substituted unquoted.
    pub const BREAKING_VARIABLES: &str = r#"{"APP_NAME": "a: b", "TAG": "v1"}"#;
}

/// A test fixture that provides a temporary directory with optional chart
/// files.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_file("values.yaml", "name: @{APP_NAME}\n");
///
/// fixture.command().args(["helm", "values", "values.yaml"]).assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add the three managed chart files.
    pub fn with_chart(self, values: &str, values_tag: &str, variables: &str) -> Self {
        self.with_file("values.yaml", values)
            .with_file("values-tag.yaml", values_tag)
            .with_file("variables.json", variables)
    }

    /// Add the standard chart fixture.
    pub fn with_standard_chart(self) -> Self {
        self.with_chart(charts::VALUES, charts::VALUES_TAG, charts::VARIABLES)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Read a file from the fixture directory.
    #[allow(dead_code)]
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).expect("Failed to read file")
    }

    /// Names of the entries in the fixture directory, sorted.
    #[allow(dead_code)]
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.path())
            .expect("Failed to list fixture directory")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// Create a command configured to run in this fixture's directory, with
    /// colored output and logging turned off.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("jntool");
        cmd.current_dir(self.path())
            .env_remove("JNTOOL_LOG")
            .env_remove("JNTOOL_HELM_BIN")
            .arg("--color")
            .arg("never");
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_chart() {
        let fixture = TestFixture::new().with_standard_chart();
        assert_eq!(
            fixture.entries(),
            ["values-tag.yaml", "values.yaml", "variables.json"]
        );
    }

    #[test]
    fn test_chart_variables_are_valid_json() {
        for doc in [charts::VARIABLES, charts::BREAKING_VARIABLES] {
            serde_json::from_str::<serde_json::Value>(doc).expect("variables should be valid JSON");
        }
    }
}
