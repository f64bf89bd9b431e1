//! # Configuration resolution
//!
//! Turns a raw data-list configuration into the flat map consumed by the
//! front end. Resolution runs in a fixed order:
//!
//! 1. The selected data source materializes `items`. Without a registered
//!    data source `items` is an empty sequence.
//! 2. The selected list editor's user settings are merged in.
//! 3. The list editor's defaults fill whatever is still missing.
//!
//! Every step is first-writer-wins, so earlier steps can never be
//! overwritten by later ones.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use datalist_engine::{InMemoryModuleLoader, default_registry, resolve};
//! use datalist_types::RawConfiguration;
//! use serde_json::json;
//!
//! let loader = InMemoryModuleLoader::new().with_enumeration("Acme", "Acme.Color", ["Red", "Green"]);
//! let registry = default_registry(Arc::new(loader))?;
//!
//! let raw: RawConfiguration = serde_json::from_value(json!({
//!     "dataSource": [{ "key": "enum", "value": { "enumType": ["Acme", "Acme.Color"] } }],
//!     "listEditor": [{ "key": "dropdown", "value": {} }]
//! }))?;
//!
//! let resolved = resolve(&raw, &registry)?;
//! assert_eq!(resolved.get("allowEmpty"), Some(&json!(true)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use datalist_registry::{ErrorEvent, ErrorSink, ProviderRegistry, TracingErrorSink};
use datalist_types::{ConfigurationError, DataListItem, RawConfiguration, ResolvedConfiguration, SelectionEntry, keys};
use datalist_util::merge_defaults;
use serde_json::Value;
use tracing::{debug, debug_span};

use crate::normalize::selected_entry;

/// Resolves raw configurations against a registry.
///
/// The resolver holds no state of its own; one instance can resolve any
/// number of configurations, from any number of threads.
#[derive(Clone, Copy)]
pub struct ConfigurationResolver<'a> {
    registry: &'a ProviderRegistry,
    errors: &'a dyn ErrorSink,
}

impl<'a> ConfigurationResolver<'a> {
    /// Creates a resolver that logs provider failures through `tracing`.
    pub fn new(registry: &'a ProviderRegistry) -> Self {
        Self {
            registry,
            errors: &TracingErrorSink,
        }
    }

    /// Routes provider failures to `errors` instead.
    pub fn with_error_sink(mut self, errors: &'a dyn ErrorSink) -> Self {
        self.errors = errors;
        self
    }

    /// Resolves `raw` into a flat configuration.
    ///
    /// # Arguments
    /// - `raw`: Persisted configuration holding the `dataSource` and
    ///   `listEditor` selections.
    ///
    /// # Returns
    /// The resolved map. It always contains `items`; a missing or
    /// unregistered provider is not an error.
    ///
    /// # Errors
    /// Returns a [`ConfigurationError`] when a selection is structurally
    /// malformed. No provider is invoked in that case.
    pub fn resolve(&self, raw: &RawConfiguration) -> Result<ResolvedConfiguration, ConfigurationError> {
        let data_source = selected_entry(raw, keys::DATA_SOURCE)?;
        let list_editor = selected_entry(raw, keys::LIST_EDITOR)?;

        let span = debug_span!(
            "resolve_configuration",
            data_source = data_source.as_ref().map(|entry| entry.key.as_str()),
            list_editor = list_editor.as_ref().map(|entry| entry.key.as_str()),
        );
        let _guard = span.enter();

        let mut resolved = ResolvedConfiguration::new();

        let items = self.items(data_source.as_ref());
        let item_count = items.len();
        resolved.insert_if_absent(keys::ITEMS, self.items_value(&items));

        if let Some(entry) = list_editor.as_ref() {
            self.merge_list_editor(entry, &mut resolved);
        }

        debug!(item_count, field_count = resolved.len(), "configuration resolved");
        Ok(resolved)
    }

    fn items(&self, entry: Option<&SelectionEntry>) -> Vec<DataListItem> {
        let Some(entry) = entry else {
            return Vec::new();
        };
        let Some(source) = self.registry.data_source(&entry.key) else {
            debug!(provider_key = %entry.key, "data source not registered");
            return Vec::new();
        };
        source.get_items(&entry.value, self.errors)
    }

    fn items_value(&self, items: &[DataListItem]) -> Value {
        serde_json::to_value(items).unwrap_or_else(|error| {
            self.errors.report(ErrorEvent::new("resolver", error));
            Value::Array(Vec::new())
        })
    }

    fn merge_list_editor(&self, entry: &SelectionEntry, resolved: &mut ResolvedConfiguration) {
        let Some(editor) = self.registry.list_editor(&entry.key) else {
            debug!(provider_key = %entry.key, "list editor not registered");
            return;
        };

        let settings = merge_defaults(&entry.value, &[&editor.default_config()]);
        for (key, value) in settings {
            if !resolved.insert_if_absent(key.as_str(), value) {
                debug!(provider_key = %entry.key, setting = %key, "setting shadowed by an earlier value");
            }
        }
    }
}

/// Resolves `raw` with a [`ConfigurationResolver`] that logs provider
/// failures through `tracing`.
pub fn resolve(raw: &RawConfiguration, registry: &ProviderRegistry) -> Result<ResolvedConfiguration, ConfigurationError> {
    ConfigurationResolver::new(registry).resolve(raw)
}
