//! Provider registry for data-list configuration.
//!
//! This crate defines the four provider families (data sources, list editors,
//! value converters and display modes), the immutable [`ProviderRegistry`]
//! that holds them, the process-wide registry published during startup, and
//! the error sink providers report isolated failures to.

pub mod config;
pub mod global;
pub mod models;
pub mod provider;
pub mod sink;

pub use config::{RegistryConfig, default_config_path};
pub use global::{global, initialize, is_initialized};
pub use models::{ProviderRegistry, ProviderRegistryBuilder, RegisteredProvider, RegistryError};
pub use provider::{DataListEditor, DataListSource, DataListValueConverter, DisplayMode, Provider};
pub use sink::{ErrorEvent, ErrorSink, MemoryErrorSink, TeeErrorSink, TracingErrorSink};
