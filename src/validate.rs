//! YAML well-formedness gate for substituted values files.

use serde_yaml::Value;

use crate::error::{Error, Result};

/// Parses `text` as YAML, returning the document.
///
/// `file` names the document in the error. This runs on every substituted
/// file before any backup of it is written, so a replacement value that
/// breaks the document structure is rejected instead of persisted.
pub fn validate_parse(file: &str, text: &str) -> Result<Value> {
    serde_yaml::from_str(text).map_err(|e| Error::Validation {
        file: file.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_document() {
        let doc = validate_parse("values.yaml", "name: demo\nreplicas: 2\n").unwrap();
        assert_eq!(doc["name"], Value::String("demo".to_string()));
    }

    #[test]
    fn test_empty_document_is_null() {
        assert_eq!(validate_parse("values.yaml", "").unwrap(), Value::Null);
    }

    #[test]
    fn test_leftover_placeholder_at_scalar_start_is_rejected() {
        // `@` is a reserved indicator and cannot start a plain scalar
        assert!(validate_parse("values.yaml", "name: @{APP_NAME}\n").is_err());
    }

    #[test]
    fn test_leftover_placeholder_inside_scalar_is_accepted() {
        let doc = validate_parse("values.yaml", "image: repo/@{IMAGE}\n").unwrap();
        assert_eq!(doc["image"], Value::String("repo/@{IMAGE}".to_string()));
    }

    #[test]
    fn test_colon_in_value_breaks_document() {
        let err = validate_parse("values.yaml", "name: a: b\n").unwrap_err();
        match err {
            Error::Validation { file, message } => {
                assert_eq!(file, "values.yaml");
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unbalanced_flow_sequence() {
        assert!(validate_parse("values-tag.yaml", "tags: [v1, v2\n").is_err());
    }
}
