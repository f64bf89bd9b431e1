use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexSet;
use tracing::{debug, warn};

use super::{LoaderError, ModuleHandle, ModuleLoader, ModuleManifest};

const MANIFEST_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Loads module manifests from a list of directories.
///
/// A module `Acme.Models` is read from the first of `Acme.Models.json`,
/// `Acme.Models.yaml` or `Acme.Models.yml` found, searching directories in
/// order. Manifests are read from disk on every call.
#[derive(Debug, Clone, Default)]
pub struct CatalogModuleLoader {
    directories: Vec<PathBuf>,
}

impl CatalogModuleLoader {
    pub fn new<P: Into<PathBuf>>(directories: impl IntoIterator<Item = P>) -> Self {
        Self {
            directories: directories.into_iter().map(Into::into).collect(),
        }
    }

    fn manifest_path(&self, module: &str) -> Option<PathBuf> {
        self.directories.iter().find_map(|directory| {
            MANIFEST_EXTENSIONS
                .iter()
                .map(|extension| directory.join(format!("{module}.{extension}")))
                .find(|candidate| candidate.is_file())
        })
    }
}

/// Module identifiers are file stems; anything that could escape the catalog
/// directory is treated as unknown.
fn is_valid_module_identifier(module: &str) -> bool {
    !module.trim().is_empty() && module != "." && module != ".." && !module.contains(['/', '\\'])
}

fn read_manifest(path: &Path) -> Result<ModuleManifest, LoaderError> {
    let content = fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path.extension().and_then(|extension| extension.to_str()) == Some("json");
    let parsed = if is_json {
        serde_json::from_str(&content).map_err(|error| error.to_string())
    } else {
        serde_yaml::from_str(&content).map_err(|error| error.to_string())
    };
    parsed.map_err(|message| LoaderError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn manifest_stem(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?;
    if !MANIFEST_EXTENSIONS.contains(&extension) {
        return None;
    }
    path.file_stem()?.to_str().map(str::to_string)
}

impl ModuleLoader for CatalogModuleLoader {
    fn load_module(&self, module: &str) -> Result<ModuleHandle, LoaderError> {
        let not_found = || LoaderError::ModuleNotFound {
            module: module.to_string(),
        };
        if !is_valid_module_identifier(module) {
            return Err(not_found());
        }
        let path = self.manifest_path(module).ok_or_else(not_found)?;

        debug!(module = %module, path = %path.display(), "loading module manifest");
        let manifest = read_manifest(&path)?;
        if manifest.module != module {
            return Err(LoaderError::ModuleMismatch {
                path,
                declared: manifest.module,
                requested: module.to_string(),
            });
        }
        Ok(ModuleHandle::new(manifest))
    }

    fn list_modules(&self) -> Result<Vec<String>, LoaderError> {
        let mut modules = IndexSet::new();
        for directory in &self.directories {
            let entries = match fs::read_dir(directory) {
                Ok(entries) => entries,
                Err(error) => {
                    warn!(directory = %directory.display(), error = %error, "skipping unreadable module catalog");
                    continue;
                }
            };

            let mut stems: Vec<String> = entries
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.is_file())
                .filter_map(|path| manifest_stem(&path))
                .collect();
            stems.sort();
            modules.extend(stems);
        }
        Ok(modules.into_iter().collect())
    }
}
