use std::sync::Arc;

use datalist_types::{ProviderDescriptor, ProviderFamily};
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use crate::provider::{DataListEditor, DataListSource, DataListValueConverter, DisplayMode, Provider};

/// Errors raised while building or publishing the provider registry.
///
/// All of these are startup failures; none can occur while resolving a
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate {family} provider key '{key}'")]
    DuplicateKey { family: ProviderFamily, key: String },

    #[error("{family} provider registered with an empty key")]
    EmptyKey { family: ProviderFamily },

    #[error("{family} provider '{key}' declares configuration field '{field}' more than once")]
    DuplicateField {
        family: ProviderFamily,
        key: String,
        field: String,
    },

    #[error("the provider registry has already been initialized")]
    AlreadyInitialized,

    #[error("the provider registry has not been initialized; call initialize() during startup")]
    NotInitialized,
}

/// A provider together with the descriptor captured when it was registered.
#[derive(Debug, Clone)]
pub struct RegisteredProvider {
    pub descriptor: ProviderDescriptor,
    pub provider: Provider,
}

impl RegisteredProvider {
    pub fn key(&self) -> &str {
        &self.descriptor.key
    }

    pub fn family(&self) -> ProviderFamily {
        self.provider.family()
    }
}

/// All known providers, keyed by family and then by provider key.
///
/// The registry is immutable once built: it is populated through
/// [`ProviderRegistryBuilder`] and only offers lookups afterwards, which makes
/// it safe to share between threads without locking.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    families: IndexMap<ProviderFamily, IndexMap<String, RegisteredProvider>>,
}

impl ProviderRegistry {
    pub fn builder() -> ProviderRegistryBuilder {
        ProviderRegistryBuilder::default()
    }

    /// Builds a registry from providers in registration order.
    ///
    /// # Errors
    /// Returns the first [`RegistryError`] raised by
    /// [`ProviderRegistryBuilder::register`].
    pub fn from_providers(providers: impl IntoIterator<Item = Provider>) -> Result<Self, RegistryError> {
        let mut builder = Self::builder();
        for provider in providers {
            builder.register(provider)?;
        }
        Ok(builder.build())
    }

    /// Looks up a provider by exact, case-sensitive key.
    ///
    /// A miss is not an error; callers treat it as "no provider resolved".
    pub fn get(&self, family: ProviderFamily, key: &str) -> Option<&RegisteredProvider> {
        self.families.get(&family)?.get(key)
    }

    /// Descriptors of a family in registration order.
    pub fn list(&self, family: ProviderFamily) -> Vec<&ProviderDescriptor> {
        self.families
            .get(&family)
            .map(|providers| providers.values().map(|entry| &entry.descriptor).collect())
            .unwrap_or_default()
    }

    pub fn data_source(&self, key: &str) -> Option<Arc<dyn DataListSource>> {
        match &self.get(ProviderFamily::DataSource, key)?.provider {
            Provider::DataSource(source) => Some(Arc::clone(source)),
            _ => None,
        }
    }

    pub fn list_editor(&self, key: &str) -> Option<Arc<dyn DataListEditor>> {
        match &self.get(ProviderFamily::ListEditor, key)?.provider {
            Provider::ListEditor(editor) => Some(Arc::clone(editor)),
            _ => None,
        }
    }

    pub fn value_converter(&self, key: &str) -> Option<Arc<dyn DataListValueConverter>> {
        match &self.get(ProviderFamily::ValueConverter, key)?.provider {
            Provider::ValueConverter(converter) => Some(Arc::clone(converter)),
            _ => None,
        }
    }

    pub fn display_mode(&self, key: &str) -> Option<Arc<dyn DisplayMode>> {
        match &self.get(ProviderFamily::DisplayMode, key)?.provider {
            Provider::DisplayMode(mode) => Some(Arc::clone(mode)),
            _ => None,
        }
    }

    /// Total number of registered providers across all families.
    pub fn len(&self) -> usize {
        self.families.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Populates a [`ProviderRegistry`].
#[derive(Debug, Default)]
pub struct ProviderRegistryBuilder {
    registry: ProviderRegistry,
}

impl ProviderRegistryBuilder {
    /// Registers a provider under its descriptor key.
    ///
    /// The descriptor is captured once here and never requested again.
    ///
    /// # Errors
    /// - [`RegistryError::EmptyKey`] when the descriptor key is blank.
    /// - [`RegistryError::DuplicateField`] when two fields share a key.
    /// - [`RegistryError::DuplicateKey`] when the family already has the key.
    pub fn register(&mut self, provider: Provider) -> Result<&mut Self, RegistryError> {
        let family = provider.family();
        let descriptor = provider.descriptor();

        if descriptor.key.trim().is_empty() {
            return Err(RegistryError::EmptyKey { family });
        }
        if let Some(field) = descriptor.duplicate_field_key() {
            return Err(RegistryError::DuplicateField {
                family,
                key: descriptor.key.clone(),
                field: field.to_string(),
            });
        }

        let providers = self.registry.families.entry(family).or_default();
        if providers.contains_key(&descriptor.key) {
            return Err(RegistryError::DuplicateKey {
                family,
                key: descriptor.key,
            });
        }

        debug!(
            family = %family,
            provider_key = %descriptor.key,
            field_count = descriptor.fields.len(),
            "provider registered"
        );
        providers.insert(descriptor.key.clone(), RegisteredProvider { descriptor, provider });
        Ok(self)
    }

    /// Chaining form of [`register`](Self::register).
    pub fn with(mut self, provider: Provider) -> Result<Self, RegistryError> {
        self.register(provider)?;
        Ok(self)
    }

    pub fn build(self) -> ProviderRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorSink, MemoryErrorSink};
    use datalist_types::{ConfigMap, ConfigurationField, DataListItem};

    #[derive(Debug)]
    struct FixedSource(&'static str);

    impl DataListSource for FixedSource {
        fn descriptor(&self) -> ProviderDescriptor {
            ProviderDescriptor::new(self.0, "Fixed")
        }

        fn get_items(&self, _config: &ConfigMap, _errors: &dyn ErrorSink) -> Vec<DataListItem> {
            vec![DataListItem::new("One", "1")]
        }
    }

    #[derive(Debug)]
    struct PlainEditor(&'static str);

    impl DataListEditor for PlainEditor {
        fn descriptor(&self) -> ProviderDescriptor {
            ProviderDescriptor::new(self.0, "Plain")
        }

        fn view(&self) -> &str {
            "plain"
        }
    }

    #[derive(Debug)]
    struct DoubleFieldEditor;

    impl DataListEditor for DoubleFieldEditor {
        fn descriptor(&self) -> ProviderDescriptor {
            ProviderDescriptor::new("double", "Double")
                .with_field(ConfigurationField::new("size", "Size", "number"))
                .with_field(ConfigurationField::new("size", "Size", "number"))
        }

        fn view(&self) -> &str {
            "double"
        }
    }

    #[test]
    fn exposes_views_only_for_rendered_providers() {
        let registry = ProviderRegistry::from_providers([
            Provider::list_editor(PlainEditor("plain")),
            Provider::data_source(FixedSource("fixed")),
        ])
        .expect("registry");

        let editor = registry.get(ProviderFamily::ListEditor, "plain").expect("editor");
        assert_eq!(editor.provider.view(), Some("plain"));
        let source = registry.get(ProviderFamily::DataSource, "fixed").expect("source");
        assert_eq!(source.provider.view(), None);
    }

    #[test]
    fn lists_in_registration_order() {
        let registry = ProviderRegistry::from_providers([
            Provider::list_editor(PlainEditor("zeta")),
            Provider::list_editor(PlainEditor("alpha")),
            Provider::data_source(FixedSource("fixed")),
            Provider::list_editor(PlainEditor("mid")),
        ])
        .expect("registry");

        let keys: Vec<_> = registry
            .list(ProviderFamily::ListEditor)
            .iter()
            .map(|descriptor| descriptor.key.as_str())
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(registry.list(ProviderFamily::DataSource).len(), 1);
        assert!(registry.list(ProviderFamily::DisplayMode).is_empty());
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let registry = ProviderRegistry::from_providers([Provider::data_source(FixedSource("enum"))]).expect("registry");

        assert!(registry.get(ProviderFamily::DataSource, "enum").is_some());
        assert!(registry.get(ProviderFamily::DataSource, "Enum").is_none());
        assert!(registry.get(ProviderFamily::DataSource, "enum ").is_none());
        assert!(registry.get(ProviderFamily::ListEditor, "enum").is_none());
        assert!(registry.data_source("enum").is_some());
        assert!(registry.list_editor("enum").is_none());
    }

    #[test]
    fn same_key_in_different_families_is_allowed() {
        let registry = ProviderRegistry::from_providers([
            Provider::data_source(FixedSource("shared")),
            Provider::list_editor(PlainEditor("shared")),
        ])
        .expect("registry");

        assert_eq!(
            registry.get(ProviderFamily::DataSource, "shared").map(RegisteredProvider::family),
            Some(ProviderFamily::DataSource)
        );
        assert_eq!(
            registry.get(ProviderFamily::ListEditor, "shared").map(RegisteredProvider::family),
            Some(ProviderFamily::ListEditor)
        );
    }

    #[test]
    fn duplicate_key_within_family_fails() {
        let error = ProviderRegistry::from_providers([
            Provider::list_editor(PlainEditor("dropdown")),
            Provider::list_editor(PlainEditor("dropdown")),
        ])
        .expect_err("duplicate must fail");

        assert_eq!(
            error,
            RegistryError::DuplicateKey {
                family: ProviderFamily::ListEditor,
                key: "dropdown".into()
            }
        );
        assert_eq!(error.to_string(), "duplicate list-editor provider key 'dropdown'");
    }

    #[test]
    fn empty_key_and_duplicate_fields_fail() {
        let empty = ProviderRegistry::builder().with(Provider::list_editor(PlainEditor("  ")));
        assert!(matches!(empty, Err(RegistryError::EmptyKey { .. })));

        let fields = ProviderRegistry::builder().with(Provider::list_editor(DoubleFieldEditor));
        assert!(matches!(fields, Err(RegistryError::DuplicateField { field, .. }) if field == "size"));
    }

    #[test]
    fn typed_accessor_invokes_provider() {
        let registry = ProviderRegistry::from_providers([Provider::data_source(FixedSource("fixed"))]).expect("registry");
        let sink = MemoryErrorSink::new();
        let items = registry
            .data_source("fixed")
            .map(|source| source.get_items(&ConfigMap::new(), &sink))
            .unwrap_or_default();
        assert_eq!(items, vec![DataListItem::new("One", "1")]);
        assert!(sink.is_empty());
    }
}
