use datalist_registry::DataListValueConverter;
use datalist_types::ProviderDescriptor;
use serde_json::Value;

pub const STRING_CONVERTER_KEY: &str = "string";
pub const INTEGER_CONVERTER_KEY: &str = "integer";
pub const BOOLEAN_CONVERTER_KEY: &str = "boolean";

/// Keeps stored values as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringValueConverter;

impl DataListValueConverter for StringValueConverter {
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor::new(STRING_CONVERTER_KEY, "String").with_description("Use stored values as plain text.")
    }

    fn convert(&self, stored: &str) -> Option<Value> {
        Some(Value::String(stored.to_string()))
    }
}

/// Parses stored values as signed 64-bit integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerValueConverter;

impl DataListValueConverter for IntegerValueConverter {
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor::new(INTEGER_CONVERTER_KEY, "Integer")
            .with_description("Convert stored values to whole numbers.")
    }

    fn convert(&self, stored: &str) -> Option<Value> {
        stored.trim().parse::<i64>().ok().map(Value::from)
    }
}

/// Parses `true`/`false`/`1`/`0` (case-insensitive) as booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanValueConverter;

impl DataListValueConverter for BooleanValueConverter {
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor::new(BOOLEAN_CONVERTER_KEY, "Boolean").with_description("Convert stored values to booleans.")
    }

    fn convert(&self, stored: &str) -> Option<Value> {
        match stored.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(Value::Bool(true)),
            "false" | "0" => Some(Value::Bool(false)),
            _ => None,
        }
    }
}
