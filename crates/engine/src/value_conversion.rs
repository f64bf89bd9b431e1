use datalist_registry::ProviderRegistry;
use datalist_types::{ConfigurationError, RawConfiguration, json_kind, keys};
use serde_json::Value;
use tracing::debug;

use crate::normalize::selected_entry;

fn stored_strings(stored: &Value) -> Result<Vec<&str>, ConfigurationError> {
    let invalid = |found: &Value| ConfigurationError::InvalidStoredValue {
        found: json_kind(found),
    };
    match stored {
        Value::String(text) => Ok(vec![text.as_str()]),
        Value::Array(entries) => entries
            .iter()
            .map(|entry| entry.as_str().ok_or_else(|| invalid(entry)))
            .collect(),
        other => Err(invalid(other)),
    }
}

/// Converts a stored selection into the value handed to consumers.
///
/// # Arguments
/// - `raw`: Data-list configuration whose `valueConverter` and `listEditor`
///   selections drive the conversion.
/// - `stored`: A string or a sequence of strings, as persisted.
///
/// # Returns
/// A sequence when the selected list editor holds multiple values, otherwise
/// the first converted value or `null`. Entries the converter cannot handle
/// are dropped. Without a registered converter strings pass through.
///
/// # Errors
/// [`ConfigurationError::InvalidStoredValue`] when `stored` is neither a
/// string nor a sequence of strings, and any structural error in the
/// selections.
pub fn convert_stored_value(
    raw: &RawConfiguration,
    registry: &ProviderRegistry,
    stored: &Value,
) -> Result<Value, ConfigurationError> {
    let converter_entry = selected_entry(raw, keys::VALUE_CONVERTER)?;
    let editor_entry = selected_entry(raw, keys::LIST_EDITOR)?;
    let strings = stored_strings(stored)?;

    let converter = converter_entry
        .as_ref()
        .and_then(|entry| registry.value_converter(&entry.key));
    let mut converted: Vec<Value> = match converter.as_ref() {
        Some(converter) => strings.iter().filter_map(|text| converter.convert(text)).collect(),
        None => strings.iter().map(|text| Value::String(text.to_string())).collect(),
    };
    if converted.len() < strings.len() {
        debug!(dropped = strings.len() - converted.len(), "stored values could not be converted");
    }

    let multiple = editor_entry.as_ref().is_some_and(|entry| {
        registry
            .list_editor(&entry.key)
            .is_some_and(|editor| editor.has_multiple_values(&entry.value))
    });

    if multiple {
        Ok(Value::Array(converted))
    } else if converted.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(converted.swap_remove(0))
    }
}
