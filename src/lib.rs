//! # jntool Library
//!
//! Core functionality behind the `jntool` command-line toolbox. The binary
//! is a thin clap front end over these modules.
//!
//! ## Quick Example
//!
//! ```
//! use jntool::placeholder::{extract_keys, substitute, VariableMap};
//! use jntool::merge::merge;
//!
//! let template = "name: @{APP_NAME}\n";
//! assert_eq!(extract_keys(template).keys(), ["APP_NAME"]);
//!
//! let vars: VariableMap = [("APP_NAME", "demo")].into_iter().collect();
//! let values: serde_yaml::Value = serde_yaml::from_str(&substitute(template, &vars)).unwrap();
//! let tags: serde_yaml::Value = serde_yaml::from_str("tag: v2\n").unwrap();
//!
//! let merged = merge(values, tags).unwrap();
//! assert_eq!(serde_yaml::to_string(&merged).unwrap(), "name: demo\ntag: v2\n");
//! ```
//!
//! ## Chart values workflow
//!
//! A chart directory holds `values.yaml` and `values-tag.yaml` with
//! `@{KEY}` placeholders, plus `variables.json` supplying their values.
//!
//! - **`values`**: lists the placeholders of a file as a fill-in template.
//! - **`apply_vars`**: snapshots the three files to `.default` siblings,
//!   substitutes placeholders, validates the result and writes numbered
//!   backups (`values.yaml.N.bak`).
//! - **`install`**: restores the latest backups, shallow-merges the tag file
//!   into the values file, hands the result to a [`installer::ChartInstaller`]
//!   and always restores the `.default` snapshots afterwards.
//!
//! Supporting modules: `backup` (snapshots and numbering), `placeholder`
//! (token scanning), `validate` (YAML gate), `merge` (shallow merge),
//! `layout` (managed file names).
//!
//! ## File moves
//!
//! `fileops` filters a directory by extension and name substring and moves
//! the matches into one or more destinations.

pub mod apply_vars;
pub mod backup;
pub mod error;
pub mod fileops;
pub mod install;
pub mod installer;
pub mod layout;
pub mod merge;
pub mod output;
pub mod placeholder;
pub mod validate;
pub mod values;

#[cfg(test)]
mod placeholder_proptest;
