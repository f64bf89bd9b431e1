//! Typed error for structurally corrupt persisted configuration.

use thiserror::Error;

/// Raised when persisted configuration is not shaped as documented.
///
/// A missing provider is never reported through this type; it only covers
/// input that indicates corrupted state, which callers are expected to
/// surface instead of rendering an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("configuration field '{field}' must be a sequence of selection entries, found {found}")]
    NotASequence { field: String, found: &'static str },

    #[error("selection entry in '{field}' must be an object, found {found}")]
    EntryNotAnObject { field: String, found: &'static str },

    #[error("selection entry in '{field}' has neither a 'key' nor a legacy 'type'")]
    MissingKey { field: String },

    #[error("selection entry key in '{field}' must be a string, found {found}")]
    KeyNotAString { field: String, found: &'static str },

    #[error("'value' of selection entry '{key}' in '{field}' must be an object, found {found}")]
    ValueNotAnObject {
        field: String,
        key: String,
        found: &'static str,
    },

    #[error("stored value must be a string or a sequence of strings, found {found}")]
    InvalidStoredValue { found: &'static str },
}

impl ConfigurationError {
    /// Raw configuration field the error refers to, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NotASequence { field, .. }
            | Self::EntryNotAnObject { field, .. }
            | Self::MissingKey { field }
            | Self::KeyNotAString { field, .. }
            | Self::ValueNotAnObject { field, .. } => Some(field),
            Self::InvalidStoredValue { .. } => None,
        }
    }
}
