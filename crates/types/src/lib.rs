//! Shared type definitions for the data list configuration engine.
//!
//! These types carry no provider behavior; every other crate in the
//! workspace speaks in terms of them.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod error;
pub mod selection;

pub use error::ConfigurationError;
pub use selection::{SelectionEntry, first_entry, json_kind};

/// Insertion-ordered map of opaque configuration values.
///
/// Provider sub-configuration and editor defaults use this shape. The engine never inspects provider-specific keys; each
/// provider validates its own entries.
pub type ConfigMap = IndexMap<String, Value>;

/// The persisted configuration of a single property instance.
///
/// Keys are configuration field names (`dataSource`, `listEditor`, ...);
/// values are expected to be one-element sequences of selection entries.
pub type RawConfiguration = IndexMap<String, Value>;

/// Well-known keys used in raw and resolved configuration.
pub mod keys {
    /// Raw configuration field selecting the data source.
    pub const DATA_SOURCE: &str = "dataSource";
    /// Raw configuration field selecting the list editor.
    pub const LIST_EDITOR: &str = "listEditor";
    /// Raw configuration field selecting the value converter.
    pub const VALUE_CONVERTER: &str = "valueConverter";
    /// Raw configuration field selecting the display mode.
    pub const DISPLAY_MODE: &str = "displayMode";
    /// Resolved configuration key holding the materialized items.
    pub const ITEMS: &str = "items";
    /// Current discriminator of a selection entry.
    pub const ENTRY_KEY: &str = "key";
    /// Legacy discriminator of a selection entry, renamed to `key`.
    pub const LEGACY_ENTRY_TYPE: &str = "type";
    /// Provider sub-configuration of a selection entry.
    pub const ENTRY_VALUE: &str = "value";
}

/// A single option exposed to a rendered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataListItem {
    /// Human-friendly label.
    pub name: String,
    /// Stored identifier.
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

impl DataListItem {
    /// Build an item from a label and its stored value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            description: None,
            icon: None,
            disabled: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One editable setting exposed by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationField {
    /// Setting key, unique within the owning provider.
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Identifier of the widget used to edit the setting (e.g. `boolean`).
    pub renderer: String,
    /// Opaque settings passed to the renderer.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub renderer_config: ConfigMap,
}

impl ConfigurationField {
    pub fn new(key: impl Into<String>, label: impl Into<String>, renderer: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: String::new(),
            renderer: renderer.into(),
            renderer_config: ConfigMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_renderer_config(mut self, renderer_config: ConfigMap) -> Self {
        self.renderer_config = renderer_config;
        self
    }
}

/// Static identity of a provider.
///
/// Descriptors are captured once when a provider is registered and are never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDescriptor {
    /// Stable identifier, unique within the provider's family.
    pub key: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    /// Editable settings in display order.
    #[serde(default)]
    pub fields: Vec<ConfigurationField>,
}

impl ProviderDescriptor {
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            description: String::new(),
            icon: String::new(),
            fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_field(mut self, field: ConfigurationField) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the first field key that appears more than once, if any.
    pub fn duplicate_field_key(&self) -> Option<&str> {
        self.fields
            .iter()
            .enumerate()
            .find(|(index, field)| self.fields[..*index].iter().any(|earlier| earlier.key == field.key))
            .map(|(_, field)| field.key.as_str())
    }
}

/// Capability family a provider belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderFamily {
    DataSource,
    ListEditor,
    ValueConverter,
    DisplayMode,
}

impl ProviderFamily {
    /// Every family, in the order the settings screen presents them.
    pub const ALL: [ProviderFamily; 4] = [Self::DataSource, Self::ListEditor, Self::ValueConverter, Self::DisplayMode];

    /// Stable tag used on the command line and in logs.
    pub fn tag(self) -> &'static str {
        match self {
            Self::DataSource => "data-source",
            Self::ListEditor => "list-editor",
            Self::ValueConverter => "value-converter",
            Self::DisplayMode => "display-mode",
        }
    }

    /// Raw configuration field through which a provider of this family is selected.
    pub fn configuration_field(self) -> &'static str {
        match self {
            Self::DataSource => keys::DATA_SOURCE,
            Self::ListEditor => keys::LIST_EDITOR,
            Self::ValueConverter => keys::VALUE_CONVERTER,
            Self::DisplayMode => keys::DISPLAY_MODE,
        }
    }
}

impl fmt::Display for ProviderFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProviderFamilyError(pub String);

impl fmt::Display for ParseProviderFamilyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid provider family '{}'; expected one of data-source, list-editor, value-converter, display-mode",
            self.0
        )
    }
}

impl std::error::Error for ParseProviderFamilyError {}

impl FromStr for ProviderFamily {
    type Err = ParseProviderFamilyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderFamily::ALL
            .into_iter()
            .find(|family| family.tag() == s || family.configuration_field() == s)
            .ok_or_else(|| ParseProviderFamilyError(s.to_string()))
    }
}

/// Flattened configuration handed to the renderer.
///
/// Keys keep the order in which they were first written; a key is never
/// overwritten once present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedConfiguration(ConfigMap);

impl ResolvedConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `value` under `key` unless the key is already present.
    ///
    /// Returns `true` when the value was written.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: Value) -> bool {
        match self.0.entry(key.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Materialized items, when present and well formed.
    pub fn items(&self) -> Option<Vec<DataListItem>> {
        self.0
            .get(keys::ITEMS)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}
