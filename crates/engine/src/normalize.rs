//! Selection-entry normalization.
//!
//! Older configurations identify the chosen provider with a `type` property
//! where current ones use `key`. Entries are normalized to the `key` shape
//! before any registry lookup so both generations resolve identically.

use datalist_types::{ConfigurationError, RawConfiguration, SelectionEntry, first_entry, json_kind, keys};
use serde_json::{Map as JsonMap, Value};

/// Rewrites a legacy `{ type, value }` entry to `{ key, value }`.
///
/// When `key` is absent and `type` is present, `type` is moved into `key`.
/// Entries that already carry `key` (or carry neither) are returned
/// unchanged. The input is never mutated and applying the function twice
/// yields the same result as applying it once.
pub fn normalize_entry(entry: &JsonMap<String, Value>) -> JsonMap<String, Value> {
    if entry.contains_key(keys::ENTRY_KEY) || !entry.contains_key(keys::LEGACY_ENTRY_TYPE) {
        return entry.clone();
    }

    entry
        .iter()
        .map(|(name, value)| {
            if name == keys::LEGACY_ENTRY_TYPE {
                (keys::ENTRY_KEY.to_string(), value.clone())
            } else {
                (name.clone(), value.clone())
            }
        })
        .collect()
}

/// Normalizes one persisted entry of `field`, rejecting non-object entries.
pub fn normalize_selection(field: &str, entry: &Value) -> Result<JsonMap<String, Value>, ConfigurationError> {
    match entry {
        Value::Object(map) => Ok(normalize_entry(map)),
        other => Err(ConfigurationError::EntryNotAnObject {
            field: field.to_string(),
            found: json_kind(other),
        }),
    }
}

/// Reads, normalizes and validates the selected entry of `field`.
///
/// # Returns
/// `Ok(None)` when nothing is selected (field absent, `null`, or an empty
/// sequence). Any structural problem with the field or its first entry is
/// returned as a [`ConfigurationError`].
pub fn selected_entry(raw: &RawConfiguration, field: &str) -> Result<Option<SelectionEntry>, ConfigurationError> {
    let Some(entry) = first_entry(raw, field)? else {
        return Ok(None);
    };
    let normalized = normalize_selection(field, entry)?;
    SelectionEntry::from_normalized(field, &normalized).map(Some)
}
