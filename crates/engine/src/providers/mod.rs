//! Providers shipped with the engine.

mod display_modes;
mod enum_source;
mod list_editors;
mod value_converters;

use std::sync::Arc;

use datalist_registry::{Provider, ProviderRegistry, RegistryError};

use crate::loader::ModuleLoader;

pub use display_modes::{CARDS_DISPLAY_MODE_KEY, CardsDisplayMode, LIST_DISPLAY_MODE_KEY, ListDisplayMode};
pub use enum_source::{ENUM_SOURCE_KEY, ENUM_TYPE_FIELD, EnumDataListSource, SORT_ALPHABETICALLY_FIELD};
pub use list_editors::{
    CHECKBOX_LIST_KEY, CheckboxListEditor, DROPDOWN_KEY, DropdownListEditor, RADIO_BUTTON_LIST_KEY,
    RadioButtonListEditor,
};
pub use value_converters::{
    BOOLEAN_CONVERTER_KEY, BooleanValueConverter, INTEGER_CONVERTER_KEY, IntegerValueConverter, STRING_CONVERTER_KEY,
    StringValueConverter,
};

/// Every built-in provider, in registration order.
pub fn builtin_providers(loader: Arc<dyn ModuleLoader>) -> Vec<Provider> {
    vec![
        Provider::data_source(EnumDataListSource::new(loader)),
        Provider::list_editor(DropdownListEditor),
        Provider::list_editor(CheckboxListEditor),
        Provider::list_editor(RadioButtonListEditor),
        Provider::value_converter(StringValueConverter),
        Provider::value_converter(IntegerValueConverter),
        Provider::value_converter(BooleanValueConverter),
        Provider::display_mode(ListDisplayMode),
        Provider::display_mode(CardsDisplayMode),
    ]
}

/// Builds a registry holding the built-in providers.
///
/// # Errors
/// Only fails if a built-in provider is malformed.
pub fn default_registry(loader: Arc<dyn ModuleLoader>) -> Result<ProviderRegistry, RegistryError> {
    ProviderRegistry::from_providers(builtin_providers(loader))
}
