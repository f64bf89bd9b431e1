//! Helpers shared by the registry, engine, and CLI crates.

pub mod config_merge;
pub mod path_processing;
pub mod text_processing;

pub use config_merge::{merge_defaults, merge_missing};
pub use path_processing::{config_path_from_env, expand_tilde};
pub use text_processing::{is_truthy, split_pascal_casing};
