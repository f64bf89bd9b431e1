//! Process-wide provider registry.
//!
//! The registry is published exactly once, during startup, through
//! [`initialize`]. There is no lazy fallback: calling [`global`] before
//! initialization is an error, which keeps startup ordering explicit and
//! testable. The published registry lives until the process exits.

use once_cell::sync::OnceCell;
use tracing::info;

use crate::{ProviderRegistry, RegistryError};

static REGISTRY: OnceCell<ProviderRegistry> = OnceCell::new();

/// Publishes `registry` as the process-wide provider registry.
///
/// # Errors
/// Returns [`RegistryError::AlreadyInitialized`] if a registry was already
/// published; the existing registry is kept.
pub fn initialize(registry: ProviderRegistry) -> Result<&'static ProviderRegistry, RegistryError> {
    let provider_count = registry.len();
    REGISTRY.set(registry).map_err(|_| RegistryError::AlreadyInitialized)?;
    info!(provider_count, "provider registry initialized");
    global()
}

/// Returns the process-wide provider registry.
///
/// # Errors
/// Returns [`RegistryError::NotInitialized`] before [`initialize`] succeeds.
pub fn global() -> Result<&'static ProviderRegistry, RegistryError> {
    REGISTRY.get().ok_or(RegistryError::NotInitialized)
}

pub fn is_initialized() -> bool {
    REGISTRY.get().is_some()
}
