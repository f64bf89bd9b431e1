//! # Datalist Engine
//!
//! Resolves persisted data-list configurations against a
//! [`ProviderRegistry`](datalist_registry::ProviderRegistry).
//!
//! ## Key Features
//!
//! - **Normalization**: legacy `{ type, value }` selections are read as
//!   `{ key, value }` before any lookup.
//! - **Resolution**: the selected data source produces `items` and the
//!   selected list editor contributes its settings, first writer wins.
//! - **Enumeration source**: lists enumeration members through a pluggable
//!   [`ModuleLoader`].
//! - **Built-ins**: list editors, value converters and display modes ready to
//!   register through [`default_registry`].
//!
//! ## Architecture
//!
//! - **`normalize`**: selection-entry normalization and validation
//! - **`resolve`**: the resolution pipeline
//! - **`loader`**: module loaders backing the enumeration source
//! - **`providers`**: built-in providers
//! - **`configuration_editor`**, **`value_conversion`**, **`display_mode`**:
//!   the settings screen model and the remaining provider families

pub mod configuration_editor;
pub mod display_mode;
pub mod loader;
pub mod normalize;
pub mod providers;
pub mod resolve;
pub mod value_conversion;

pub use configuration_editor::{CONFIGURATION_EDITOR_RENDERER, configuration_fields};
pub use display_mode::{DisplayModeSettings, resolve_display_mode};
pub use loader::{
    CatalogModuleLoader, InMemoryModuleLoader, LoaderError, ModuleHandle, ModuleLoader, ModuleManifest, TypeDefinition,
    TypeHandle, TypeKind,
};
pub use normalize::{normalize_entry, normalize_selection, selected_entry};
pub use providers::{EnumDataListSource, builtin_providers, default_registry};
pub use resolve::{ConfigurationResolver, resolve};
pub use value_conversion::convert_stored_value;
