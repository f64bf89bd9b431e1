use datalist_registry::ProviderRegistry;
use datalist_types::{ConfigMap, ConfigurationError, RawConfiguration, keys};
use datalist_util::merge_defaults;
use serde::Serialize;
use tracing::debug;

use crate::normalize::selected_entry;

/// The display mode chosen for a block list, with its effective settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayModeSettings {
    pub key: String,
    pub view: String,
    /// User settings merged over the mode's defaults.
    pub config: ConfigMap,
}

/// Resolves the `displayMode` selection of `raw`.
///
/// Returns `Ok(None)` when nothing is selected or the key is not registered.
pub fn resolve_display_mode(
    raw: &RawConfiguration,
    registry: &ProviderRegistry,
) -> Result<Option<DisplayModeSettings>, ConfigurationError> {
    let Some(entry) = selected_entry(raw, keys::DISPLAY_MODE)? else {
        return Ok(None);
    };
    let Some(mode) = registry.display_mode(&entry.key) else {
        debug!(provider_key = %entry.key, "display mode not registered");
        return Ok(None);
    };

    Ok(Some(DisplayModeSettings {
        view: mode.view().to_string(),
        config: merge_defaults(&entry.value, &[&mode.default_config()]),
        key: entry.key,
    }))
}
