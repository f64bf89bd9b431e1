//! Persisted provider selections.
//!
//! A selection is stored as a sequence of `{ key, value }` objects even though
//! only the first element is ever consulted; the wrapper keeps the format open
//! for multi-select. These helpers validate that shape without interpreting
//! provider-specific settings.

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};

use crate::{ConfigMap, ConfigurationError, RawConfiguration, keys};

/// A persisted choice of one provider plus its sub-configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub key: String,
    #[serde(default)]
    pub value: ConfigMap,
}

impl SelectionEntry {
    /// Build an entry from an object that already carries the current `key`
    /// discriminator.
    ///
    /// # Arguments
    /// - `field`: Raw configuration field the entry was read from, used in errors.
    /// - `entry`: Normalized entry object.
    ///
    /// # Returns
    /// Returns the typed entry. A missing or `null` `value` becomes an empty
    /// map; any other non-object `value` is rejected.
    pub fn from_normalized(field: &str, entry: &JsonMap<String, Value>) -> Result<Self, ConfigurationError> {
        let key = match entry.get(keys::ENTRY_KEY) {
            Some(Value::String(key)) => key.clone(),
            Some(other) => {
                return Err(ConfigurationError::KeyNotAString {
                    field: field.to_string(),
                    found: json_kind(other),
                });
            }
            None => return Err(ConfigurationError::MissingKey { field: field.to_string() }),
        };

        let value = match entry.get(keys::ENTRY_VALUE) {
            None | Some(Value::Null) => ConfigMap::new(),
            Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            Some(other) => {
                return Err(ConfigurationError::ValueNotAnObject {
                    field: field.to_string(),
                    key,
                    found: json_kind(other),
                });
            }
        };

        Ok(Self { key, value })
    }
}

/// Returns the first persisted entry of `field`, if any.
///
/// An absent field, a `null`, or an empty sequence all mean "nothing
/// selected". Anything other than a sequence is structural corruption.
pub fn first_entry<'a>(raw: &'a RawConfiguration, field: &str) -> Result<Option<&'a Value>, ConfigurationError> {
    match raw.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(entries)) => Ok(entries.first()),
        Some(other) => Err(ConfigurationError::NotASequence {
            field: field.to_string(),
            found: json_kind(other),
        }),
    }
}

/// Short name of a JSON value's kind, used in error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> JsonMap<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn first_entry_treats_absent_and_empty_as_unselected() {
        let raw: RawConfiguration = serde_yaml::from_str("dataSource: []\nlistEditor: null\n").expect("parse raw");
        assert_eq!(first_entry(&raw, "dataSource"), Ok(None));
        assert_eq!(first_entry(&raw, "listEditor"), Ok(None));
        assert_eq!(first_entry(&raw, "valueConverter"), Ok(None));
    }

    #[test]
    fn first_entry_rejects_non_sequences() {
        let mut raw = RawConfiguration::new();
        raw.insert("dataSource".into(), json!({ "key": "enum" }));
        let error = first_entry(&raw, "dataSource").expect_err("object is not a sequence");
        assert_eq!(
            error,
            ConfigurationError::NotASequence {
                field: "dataSource".into(),
                found: "object"
            }
        );
        assert_eq!(error.field(), Some("dataSource"));
    }

    #[test]
    fn from_normalized_reads_key_and_value_in_order() {
        let entry = object(json!({ "key": "dropdown", "value": { "zeta": 1, "alpha": 2 } }));
        let selection = SelectionEntry::from_normalized("listEditor", &entry).expect("valid entry");
        assert_eq!(selection.key, "dropdown");
        assert_eq!(selection.value.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn from_normalized_accepts_missing_value() {
        let entry = object(json!({ "key": "dropdown" }));
        let selection = SelectionEntry::from_normalized("listEditor", &entry).expect("valid entry");
        assert!(selection.value.is_empty());
    }

    #[test]
    fn from_normalized_rejects_malformed_entries() {
        let missing = object(json!({ "value": {} }));
        assert!(matches!(
            SelectionEntry::from_normalized("listEditor", &missing),
            Err(ConfigurationError::MissingKey { .. })
        ));

        let numeric_key = object(json!({ "key": 7 }));
        assert!(matches!(
            SelectionEntry::from_normalized("listEditor", &numeric_key),
            Err(ConfigurationError::KeyNotAString { found: "number", .. })
        ));

        let list_value = object(json!({ "key": "dropdown", "value": [1, 2] }));
        assert!(matches!(
            SelectionEntry::from_normalized("listEditor", &list_value),
            Err(ConfigurationError::ValueNotAnObject { found: "sequence", .. })
        ));
    }
}
