//! Values document merging
//!
//! Combines a base values document with an overlay by overriding top-level
//! keys only. Nested mappings and sequences in the overlay replace the base
//! entry wholesale; they are not merged recursively.
//!
//! ```
//! use jntool::merge::merge;
//!
//! let base = serde_yaml::from_str("a: 1\nb: 2\n").unwrap();
//! let overlay = serde_yaml::from_str("b: 9\nc: 3\n").unwrap();
//! let merged = merge(base, overlay).unwrap();
//! assert_eq!(serde_yaml::to_string(&merged).unwrap(), "a: 1\nb: 9\nc: 3\n");
//! ```

use log::debug;
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// Sets every top-level key of `overlay` on `base` and returns the result.
///
/// Keys only in `base` keep their position and value; overlay-only keys are
/// appended in overlay order. An empty (null) document counts as an empty
/// mapping. Any other non-mapping top level is an error.
pub fn merge(base: Value, overlay: Value) -> Result<Value> {
    let mut base = into_mapping(base, "base")?;
    for (key, value) in into_mapping(overlay, "overlay")? {
        if base.contains_key(&key) {
            debug!("overriding top-level key {}", describe_key(&key));
        }
        base.insert(key, value);
    }
    Ok(Value::Mapping(base))
}

fn into_mapping(value: Value, role: &str) -> Result<Mapping> {
    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        other => Err(Error::Merge {
            message: format!(
                "{} values document must be a mapping, found {}",
                role,
                type_name(&other)
            ),
        }),
    }
}

fn describe_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => format!("{:?}", other),
    }
}

/// Get a human-readable type name for a YAML value
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
