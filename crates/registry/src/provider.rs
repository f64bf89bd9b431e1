//! Provider capability traits.
//!
//! Every pluggable behavior is one of four families. Each family is a trait
//! object so the registry can hold providers it knows nothing about at
//! compile time; [`Provider`] tags the trait object with its family.

use std::{fmt::Debug, sync::Arc};

use datalist_types::{ConfigMap, DataListItem, ProviderDescriptor, ProviderFamily};
use serde_json::Value;

use crate::ErrorSink;

/// Supplies the options of a list.
///
/// Implementations must isolate their own failures: anything that goes wrong
/// while materializing items is reported to `errors` and results in an empty
/// list. Items are regenerated on every call.
pub trait DataListSource: Send + Sync + Debug {
    fn descriptor(&self) -> ProviderDescriptor;

    /// Materialize items from the user-supplied sub-configuration.
    fn get_items(&self, config: &ConfigMap, errors: &dyn ErrorSink) -> Vec<DataListItem>;
}

/// Renders and edits a list.
pub trait DataListEditor: Send + Sync + Debug {
    fn descriptor(&self) -> ProviderDescriptor;

    /// Settings applied when the user has not supplied a value for the key.
    fn default_config(&self) -> ConfigMap {
        ConfigMap::new()
    }

    /// Identifier of the view used by the front end.
    fn view(&self) -> &str;

    /// Whether the editor stores more than one selected value.
    fn has_multiple_values(&self, _config: &ConfigMap) -> bool {
        false
    }
}

/// Converts a stored value for consumption.
pub trait DataListValueConverter: Send + Sync + Debug {
    fn descriptor(&self) -> ProviderDescriptor;

    /// Returns `None` when the stored text cannot be represented.
    fn convert(&self, stored: &str) -> Option<Value>;
}

/// Presentation of nested block lists.
pub trait DisplayMode: Send + Sync + Debug {
    fn descriptor(&self) -> ProviderDescriptor;

    fn default_config(&self) -> ConfigMap {
        ConfigMap::new()
    }

    fn view(&self) -> &str;
}

/// A provider tagged with its capability family.
#[derive(Debug, Clone)]
pub enum Provider {
    DataSource(Arc<dyn DataListSource>),
    ListEditor(Arc<dyn DataListEditor>),
    ValueConverter(Arc<dyn DataListValueConverter>),
    DisplayMode(Arc<dyn DisplayMode>),
}

impl Provider {
    pub fn data_source(source: impl DataListSource + 'static) -> Self {
        Self::DataSource(Arc::new(source))
    }

    pub fn list_editor(editor: impl DataListEditor + 'static) -> Self {
        Self::ListEditor(Arc::new(editor))
    }

    pub fn value_converter(converter: impl DataListValueConverter + 'static) -> Self {
        Self::ValueConverter(Arc::new(converter))
    }

    pub fn display_mode(mode: impl DisplayMode + 'static) -> Self {
        Self::DisplayMode(Arc::new(mode))
    }

    pub fn family(&self) -> ProviderFamily {
        match self {
            Self::DataSource(_) => ProviderFamily::DataSource,
            Self::ListEditor(_) => ProviderFamily::ListEditor,
            Self::ValueConverter(_) => ProviderFamily::ValueConverter,
            Self::DisplayMode(_) => ProviderFamily::DisplayMode,
        }
    }

    pub fn descriptor(&self) -> ProviderDescriptor {
        match self {
            Self::DataSource(source) => source.descriptor(),
            Self::ListEditor(editor) => editor.descriptor(),
            Self::ValueConverter(converter) => converter.descriptor(),
            Self::DisplayMode(mode) => mode.descriptor(),
        }
    }

    /// Renderer identifier for editors and display modes.
    pub fn view(&self) -> Option<&str> {
        match self {
            Self::ListEditor(editor) => Some(editor.view()),
            Self::DisplayMode(mode) => Some(mode.view()),
            Self::DataSource(_) | Self::ValueConverter(_) => None,
        }
    }
}
