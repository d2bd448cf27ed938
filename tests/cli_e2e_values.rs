//! End-to-end tests for the `helm values` command
//!
//! These tests invoke the actual CLI binary and validate its behavior
//! from a user's perspective.

mod common;
use common::prelude::*;

/// Test that --help flag shows help information
#[test]
fn test_values_help() {
    let mut cmd = cargo_bin_cmd!("jntool");

    cmd.args(["helm", "values", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Extract all @{VAR} placeholders from a Helm values file",
        ));
}

/// JSON is the default output format
#[test]
fn test_values_default_json() {
    let fixture = TestFixture::new().with_file("values.yaml", common::charts::VALUES);

    let output = fixture
        .command()
        .args(["helm", "values", "values.yaml"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed, serde_json::json!({"APP_NAME": ""}));
}

/// Keys are listed once each, in first-occurrence order
#[test]
fn test_values_json_key_order() {
    let fixture =
        TestFixture::new().with_file("values.yaml", "b: @{SECOND}\na: @{FIRST}\nc: @{SECOND}\n");

    fixture
        .command()
        .args(["helm", "values", "values.yaml", "-o", "json"])
        .assert()
        .success()
        .stdout("{\n  \"SECOND\": \"\",\n  \"FIRST\": \"\"\n}\n");
}

/// YAML output parses back into the same template
#[test]
fn test_values_yaml() {
    let fixture = TestFixture::new().with_file("values-tag.yaml", common::charts::VALUES_TAG);

    let output = fixture
        .command()
        .args(["helm", "values", "values-tag.yaml", "--output", "yaml"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_yaml::Value = serde_yaml::from_slice(&output).unwrap();
    let expected: serde_yaml::Value = serde_yaml::from_str("TAG: ''").unwrap();
    assert_eq!(parsed, expected);
}

/// A file without placeholders yields an empty mapping
#[test]
fn test_values_no_placeholders() {
    let fixture = TestFixture::new().with_file("values.yaml", "foo: bar\nnested:\n  key: value\n");

    fixture
        .command()
        .args(["helm", "values", "values.yaml"])
        .assert()
        .success()
        .stdout("{}\n");
}

/// Unknown formats are rejected
#[test]
fn test_values_unsupported_format() {
    let fixture = TestFixture::new().with_file("values.yaml", "foo: bar\n");

    fixture
        .command()
        .args(["helm", "values", "values.yaml", "-o", "xml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unsupported output format: xml"));
}

/// A missing input file is reported with its path
#[test]
fn test_values_missing_file() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["helm", "values", "missing.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.yaml"));
}
