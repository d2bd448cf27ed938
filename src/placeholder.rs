//! # Placeholder Substitution
//!
//! Scanning and replacement of `@{KEY}` placeholder tokens.
//!
//! ## Token grammar
//!
//! A token is `@{`, one or more characters other than `}`, then `}`. The key
//! is everything between the braces, taken verbatim (case-sensitive, no
//! trimming). There is no escape sequence: the first `}` after `@{` always
//! closes the token, so a literal `}` can never be part of a key.
//!
//! ## Example
//!
//! ```
//! use jntool::placeholder::{extract_keys, substitute, VariableMap};
//!
//! let vars = VariableMap::from_json_str("variables.json", r#"{"APP_NAME": "demo"}"#).unwrap();
//! let text = "name: @{APP_NAME}\ntag: @{TAG}\n";
//!
//! assert_eq!(substitute(text, &vars), "name: demo\ntag: @{TAG}\n");
//! assert_eq!(extract_keys(text).keys(), ["APP_NAME", "TAG"]);
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\{([^}]+)\}").expect("placeholder pattern is valid"));

/// Replacement values keyed by placeholder name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableMap {
    vars: HashMap<String, String>,
}

impl VariableMap {
    /// Parses a flat JSON object of string values. `source` names the
    /// document in error messages.
    pub fn from_json_str(source: impl Into<PathBuf>, text: &str) -> Result<Self> {
        let vars: HashMap<String, String> =
            serde_json::from_str(text).map_err(|e| Error::VariablesParse {
                path: source.into(),
                message: e.to_string(),
            })?;
        Ok(Self { vars })
    }

    /// Reads and parses a variables document from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(Error::io("read variables", path))?;
        Self::from_json_str(path, &text)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariableMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Replaces every token whose key is in `vars` with its value.
///
/// Tokens with unknown keys are left byte-for-byte unchanged, and replacement
/// values are not scanned again.
pub fn substitute(text: &str, vars: &VariableMap) -> String {
    TOKEN
        .replace_all(text, |caps: &Captures| match vars.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// The distinct placeholder keys of a document, in first-occurrence order.
///
/// Serializes as a mapping from each key to an empty string, the template a
/// user fills in to produce `variables.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTemplate {
    keys: Vec<String>,
}

impl VariableTemplate {
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Serialize for VariableTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.keys.len()))?;
        for key in &self.keys {
            map.serialize_entry(key, "")?;
        }
        map.end()
    }
}

/// Collects every distinct placeholder key found in `text`.
pub fn extract_keys(text: &str) -> VariableTemplate {
    let mut seen = HashSet::new();
    let keys = TOKEN
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .filter(|key| seen.insert(key.clone()))
        .collect();
    VariableTemplate { keys }
}
