use std::{
    fs,
    io::Error,
    path::{Path, PathBuf},
};

use datalist_util::{config_path_from_env, expand_tilde};
use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "DATALIST_CONFIG_PATH";

/// Settings read at startup before the registry is built.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Directories holding module manifests for the enumeration source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_catalogs: Option<Vec<String>>,
}

impl RegistryConfig {
    /// Loads the configuration from [`default_config_path`].
    ///
    /// A missing or unreadable file yields the default configuration; an
    /// unparsable file is logged and also yields the default.
    pub fn load() -> Self {
        Self::load_from(&default_config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            debug!(path = %path.display(), "no registry configuration file; using defaults");
            return RegistryConfig::default();
        };
        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "failed to parse registry configuration; using defaults"
                );
                RegistryConfig::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), Error> {
        self.save_to(&default_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Catalog directories with `~` expanded, in configured order.
    pub fn module_catalog_paths(&self) -> Vec<PathBuf> {
        self.module_catalogs
            .iter()
            .flatten()
            .filter(|path| !path.trim().is_empty())
            .map(|path| expand_tilde(path))
            .collect()
    }
}

/// Get the default path for the registry configuration file.
pub fn default_config_path() -> PathBuf {
    if let Some(path) = config_path_from_env(CONFIG_PATH_ENV) {
        return path;
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("datalist")
        .join("config.json")
}
