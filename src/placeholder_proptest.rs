//! Property-based tests for placeholder scanning and substitution.
//!
//! These tests use proptest to generate random documents and verify that
//! invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::placeholder::{extract_keys, substitute, VariableMap};
    use proptest::prelude::*;

    /// Text with no `@`, `{` or `}` at all, so it can never form a token.
    fn plain() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 :._\\-\n]{0,20}"
    }

    /// A valid key: one or more characters, none of them a closing brace.
    fn key() -> impl Strategy<Value = String> {
        "[A-Za-z_][A-Za-z0-9_ .-]{0,12}"
    }

    /// A document interleaving plain text and placeholder tokens.
    fn document() -> impl Strategy<Value = String> {
        prop::collection::vec((plain(), key()), 0..8).prop_map(|parts| {
            parts
                .into_iter()
                .map(|(text, key)| format!("{}@{{{}}}", text, key))
                .collect()
        })
    }

    proptest! {
        /// Property: extraction is deterministic
        #[test]
        fn extract_keys_is_idempotent(text in ".*") {
            prop_assert_eq!(extract_keys(&text), extract_keys(&text));
        }

        /// Property: filling every extracted key with a non-empty, token-free
        /// value leaves no token behind
        #[test]
        fn substituting_all_keys_leaves_no_tokens(doc in document(), value in "[a-z0-9]{1,8}") {
            let vars: VariableMap = extract_keys(&doc)
                .keys()
                .iter()
                .map(|k| (k.clone(), value.clone()))
                .collect();
            let result = substitute(&doc, &vars);
            prop_assert!(extract_keys(&result).is_empty(), "left tokens in {:?}", result);
        }

        /// Property: with no variables, substitution is the identity
        #[test]
        fn empty_variables_pass_everything_through(text in ".*") {
            prop_assert_eq!(substitute(&text, &VariableMap::default()), text);
        }

        /// Property: a token whose key is absent survives byte-for-byte
        #[test]
        fn absent_key_is_preserved(prefix in plain(), suffix in plain(), k in key()) {
            let text = format!("{}@{{{}}}{}", prefix, k, suffix);
            let vars: VariableMap = [("unrelated-key-that-never-matches}", "x")].into_iter().collect();
            prop_assert_eq!(substitute(&text, &vars), text);
        }

        /// Property: text without placeholders yields an empty template
        #[test]
        fn plain_text_has_no_keys(text in plain()) {
            prop_assert!(extract_keys(&text).is_empty());
        }

        /// Property: every extracted key is distinct
        #[test]
        fn extracted_keys_are_unique(doc in document()) {
            let template = extract_keys(&doc);
            let mut keys = template.keys().to_vec();
            keys.sort();
            keys.dedup();
            prop_assert_eq!(keys.len(), template.len());
        }
    }
}
