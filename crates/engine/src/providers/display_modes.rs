use datalist_registry::DisplayMode;
use datalist_types::{ConfigMap, ConfigurationField, ProviderDescriptor};
use serde_json::json;

pub const LIST_DISPLAY_MODE_KEY: &str = "list";
pub const CARDS_DISPLAY_MODE_KEY: &str = "cards";

fn display_mode_fields(descriptor: ProviderDescriptor) -> ProviderDescriptor {
    descriptor
        .with_field(
            ConfigurationField::new("sortableAxis", "Sortable axis", "radio-button-list")
                .with_description("Axis along which blocks can be reordered, or none."),
        )
        .with_field(
            ConfigurationField::new("enablePreview", "Enable preview", "boolean")
                .with_description("Render a preview of each block."),
        )
}

/// Blocks stacked vertically.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListDisplayMode;

impl DisplayMode for ListDisplayMode {
    fn descriptor(&self) -> ProviderDescriptor {
        display_mode_fields(
            ProviderDescriptor::new(LIST_DISPLAY_MODE_KEY, "List")
                .with_description("Blocks will be displayed in a list.")
                .with_icon("icon-list"),
        )
    }

    fn default_config(&self) -> ConfigMap {
        ConfigMap::from_iter([
            ("sortableAxis".to_string(), json!("y")),
            ("enablePreview".to_string(), json!(true)),
        ])
    }

    fn view(&self) -> &str {
        "blocks.list"
    }
}

/// Blocks laid out as a grid of cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardsDisplayMode;

impl DisplayMode for CardsDisplayMode {
    fn descriptor(&self) -> ProviderDescriptor {
        display_mode_fields(
            ProviderDescriptor::new(CARDS_DISPLAY_MODE_KEY, "Cards")
                .with_description("Blocks will be displayed as cards.")
                .with_icon("icon-playing-cards"),
        )
    }

    fn default_config(&self) -> ConfigMap {
        ConfigMap::from_iter([
            ("sortableAxis".to_string(), json!(false)),
            ("enablePreview".to_string(), json!(false)),
        ])
    }

    fn view(&self) -> &str {
        "blocks.cards"
    }
}
