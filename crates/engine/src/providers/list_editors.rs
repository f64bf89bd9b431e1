use datalist_registry::DataListEditor;
use datalist_types::{ConfigMap, ConfigurationField, ProviderDescriptor};
use serde_json::{Value, json};

pub const DROPDOWN_KEY: &str = "dropdown";
pub const CHECKBOX_LIST_KEY: &str = "checkbox-list";
pub const RADIO_BUTTON_LIST_KEY: &str = "radio-button-list";

fn defaults<const N: usize>(entries: [(&str, Value); N]) -> ConfigMap {
    entries.into_iter().map(|(key, value)| (key.to_string(), value)).collect()
}

fn show_descriptions_field() -> ConfigurationField {
    ConfigurationField::new("showDescriptions", "Show descriptions", "boolean")
        .with_description("Display the description of each item, if one is set.")
}

fn show_icons_field() -> ConfigurationField {
    ConfigurationField::new("showIcons", "Show icons", "boolean").with_description("Display the icon of each item.")
}

/// Single selection from a drop-down.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropdownListEditor;

impl DataListEditor for DropdownListEditor {
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor::new(DROPDOWN_KEY, "Dropdown List")
            .with_description("Select a single value from a dropdown select list.")
            .with_icon("icon-fa fa-caret-square-o-down")
            .with_field(
                ConfigurationField::new("allowEmpty", "Allow empty", "boolean")
                    .with_description("Enable to allow an empty option at the top of the list."),
            )
    }

    fn default_config(&self) -> ConfigMap {
        defaults([("allowEmpty", json!(true))])
    }

    fn view(&self) -> &str {
        "dropdown-list.editor"
    }
}

/// Multiple selection from a list of checkboxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckboxListEditor;

impl DataListEditor for CheckboxListEditor {
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor::new(CHECKBOX_LIST_KEY, "Checkbox List")
            .with_description("Select multiple values from a list of checkboxes.")
            .with_icon("icon-bulleted-list")
            .with_field(
                ConfigurationField::new("checkAll", "Check all", "boolean")
                    .with_description("Include a toggle that checks every item."),
            )
            .with_field(show_descriptions_field())
            .with_field(show_icons_field())
    }

    fn default_config(&self) -> ConfigMap {
        defaults([
            ("checkAll", json!(false)),
            ("showDescriptions", json!(true)),
            ("showIcons", json!(false)),
        ])
    }

    fn view(&self) -> &str {
        "checkbox-list.editor"
    }

    fn has_multiple_values(&self, _config: &ConfigMap) -> bool {
        true
    }
}

/// Single selection from a list of radio buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadioButtonListEditor;

impl DataListEditor for RadioButtonListEditor {
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor::new(RADIO_BUTTON_LIST_KEY, "Radio Button List")
            .with_description("Select a single value from a list of radio buttons.")
            .with_icon("icon-target")
            .with_field(show_descriptions_field())
            .with_field(show_icons_field())
    }

    fn default_config(&self) -> ConfigMap {
        defaults([("showDescriptions", json!(true)), ("showIcons", json!(false))])
    }

    fn view(&self) -> &str {
        "radio-button-list.editor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_declared_field() {
        let editors: [&dyn DataListEditor; 3] = [&DropdownListEditor, &CheckboxListEditor, &RadioButtonListEditor];
        for editor in editors {
            let descriptor = editor.descriptor();
            let defaults = editor.default_config();
            for field in &descriptor.fields {
                assert!(
                    defaults.contains_key(&field.key),
                    "{} has no default for {}",
                    descriptor.key,
                    field.key
                );
            }
        }
    }

    #[test]
    fn only_checkbox_list_holds_multiple_values() {
        let config = ConfigMap::new();
        assert!(CheckboxListEditor.has_multiple_values(&config));
        assert!(!DropdownListEditor.has_multiple_values(&config));
        assert!(!RadioButtonListEditor.has_multiple_values(&config));
    }
}
