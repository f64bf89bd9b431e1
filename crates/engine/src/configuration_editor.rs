use datalist_registry::ProviderRegistry;
use datalist_types::{ConfigMap, ConfigurationField, ProviderFamily};
use serde_json::{Value, json};
use tracing::warn;

/// Renderer used for every provider-selection field.
pub const CONFIGURATION_EDITOR_RENDERER: &str = "configuration-editor";

/// Families a user picks on the data-list settings screen, in display order.
const SELECTABLE_FAMILIES: [(ProviderFamily, &str, &str); 3] = [
    (
        ProviderFamily::DataSource,
        "Data source",
        "Select and configure the data source.",
    ),
    (
        ProviderFamily::ListEditor,
        "List editor",
        "Select and configure the type of editor for the data list.",
    ),
    (
        ProviderFamily::ValueConverter,
        "Value type",
        "Select the type the stored value is converted to.",
    ),
];

fn shared_renderer_config() -> ConfigMap {
    ConfigMap::from_iter([
        ("maxItems".to_string(), json!(1)),
        ("disableSorting".to_string(), json!(true)),
        ("overlayView".to_string(), json!("configuration-editor.overlay")),
        ("enableDevMode".to_string(), json!(true)),
    ])
}

/// Describes the settings screen of a data list.
///
/// One field per selectable family, each offering that family's providers in
/// registration order.
pub fn configuration_fields(registry: &ProviderRegistry) -> Vec<ConfigurationField> {
    SELECTABLE_FAMILIES
        .iter()
        .map(|(family, label, description)| {
            let mut renderer_config = shared_renderer_config();
            let descriptors = registry.list(*family);
            let items = serde_json::to_value(&descriptors).unwrap_or_else(|error| {
                warn!(family = %family, error = %error, "could not serialize provider descriptors");
                Value::Array(Vec::new())
            });
            renderer_config.insert("items".to_string(), items);

            ConfigurationField::new(family.configuration_field(), *label, CONFIGURATION_EDITOR_RENDERER)
                .with_description(*description)
                .with_renderer_config(renderer_config)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::{default_registry, loader::InMemoryModuleLoader};

    #[test]
    fn one_field_per_selectable_family() {
        let registry = default_registry(Arc::new(InMemoryModuleLoader::new())).expect("registry");
        let fields = configuration_fields(&registry);

        let keys: Vec<_> = fields.iter().map(|field| field.key.as_str()).collect();
        assert_eq!(keys, vec!["dataSource", "listEditor", "valueConverter"]);

        let editor = &fields[1];
        assert_eq!(editor.renderer, CONFIGURATION_EDITOR_RENDERER);
        assert_eq!(editor.renderer_config.get("maxItems"), Some(&json!(1)));
        assert_eq!(editor.renderer_config.get("overlayView"), Some(&json!("configuration-editor.overlay")));

        let item_keys: Vec<_> = editor.renderer_config["items"]
            .as_array()
            .expect("items array")
            .iter()
            .filter_map(|item| item["key"].as_str())
            .collect();
        assert_eq!(item_keys, vec!["dropdown", "checkbox-list", "radio-button-list"]);
    }

    #[test]
    fn empty_registry_yields_empty_item_lists() {
        let fields = configuration_fields(&ProviderRegistry::default());
        for field in fields {
            assert_eq!(field.renderer_config.get("items"), Some(&json!([])));
        }
    }
}
