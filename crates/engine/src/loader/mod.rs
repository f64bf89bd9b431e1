//! Module loading for the enumeration data source.
//!
//! The enumeration source never inspects types itself. It asks a
//! [`ModuleLoader`] to load a module by identifier, resolve a type inside it
//! and list that type's member names. Two loaders ship with the engine:
//!
//! - [`InMemoryModuleLoader`]: a catalog assembled in code.
//! - [`CatalogModuleLoader`]: module manifests read from directories on disk.

mod catalog;
mod memory;

use std::{fmt::Debug, path::PathBuf, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use catalog::CatalogModuleLoader;
pub use memory::InMemoryModuleLoader;

/// Errors raised while loading modules or inspecting their types.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("module '{module}' not found")]
    ModuleNotFound { module: String },

    #[error("type '{type_name}' not found in module '{module}'")]
    TypeNotFound { module: String, type_name: String },

    #[error("type '{type_name}' in module '{module}' is not an enumeration")]
    NotAnEnumeration { module: String, type_name: String },

    #[error("manifest {path} declares module '{declared}', expected '{requested}'")]
    ModuleMismatch {
        path: PathBuf,
        declared: String,
        requested: String,
    },

    #[error("failed to read module manifest {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse module manifest {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Category of a type declared by a module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKind {
    #[default]
    Enum,
    Class,
    Struct,
    Interface,
    #[serde(other)]
    Other,
}

/// A type declared by a module, with its members in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub members: Vec<String>,
}

impl TypeDefinition {
    pub fn enumeration<S: Into<String>>(name: impl Into<String>, members: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Enum,
            members: members.into_iter().map(Into::into).collect(),
        }
    }
}

/// Document describing one module: `{ module, types: [{ name, kind, members }] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleManifest {
    pub module: String,
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
}

impl ModuleManifest {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            types: Vec::new(),
        }
    }
}

/// A loaded module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleHandle {
    manifest: Arc<ModuleManifest>,
}

impl ModuleHandle {
    pub fn new(manifest: impl Into<Arc<ModuleManifest>>) -> Self {
        Self {
            manifest: manifest.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.manifest.module
    }

    pub fn types(&self) -> &[TypeDefinition] {
        &self.manifest.types
    }
}

/// A type resolved inside a loaded module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHandle {
    module: String,
    definition: TypeDefinition,
}

impl TypeHandle {
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn is_enumeration(&self) -> bool {
        self.definition.kind == TypeKind::Enum
    }
}

/// Loads modules and inspects the enumerations they declare.
///
/// Implementations may block. They must be callable from several threads at
/// once and must not cache results across calls unless the underlying data
/// can never change.
pub trait ModuleLoader: Send + Sync + Debug {
    /// Loads a module by identifier.
    ///
    /// # Errors
    /// [`LoaderError::ModuleNotFound`] when no module matches; I/O and parse
    /// failures for loaders backed by storage.
    fn load_module(&self, module: &str) -> Result<ModuleHandle, LoaderError>;

    /// Resolves a type by exact, qualified name.
    fn resolve_type(&self, module: &ModuleHandle, type_name: &str) -> Result<TypeHandle, LoaderError> {
        module
            .types()
            .iter()
            .find(|definition| definition.name == type_name)
            .map(|definition| TypeHandle {
                module: module.name().to_string(),
                definition: definition.clone(),
            })
            .ok_or_else(|| LoaderError::TypeNotFound {
                module: module.name().to_string(),
                type_name: type_name.to_string(),
            })
    }

    /// Member names of an enumeration in declaration order.
    ///
    /// # Errors
    /// [`LoaderError::NotAnEnumeration`] when the type is not an enumeration.
    fn list_member_names(&self, type_handle: &TypeHandle) -> Result<Vec<String>, LoaderError> {
        if !type_handle.is_enumeration() {
            return Err(LoaderError::NotAnEnumeration {
                module: type_handle.module().to_string(),
                type_name: type_handle.name().to_string(),
            });
        }
        Ok(type_handle.definition.members.clone())
    }

    /// Identifiers of every module the loader can load.
    fn list_modules(&self) -> Result<Vec<String>, LoaderError> {
        Ok(Vec::new())
    }

    /// Qualified names of the enumerations declared by `module`.
    fn list_enumerations(&self, module: &ModuleHandle) -> Vec<String> {
        module
            .types()
            .iter()
            .filter(|definition| definition.kind == TypeKind::Enum)
            .map(|definition| definition.name.clone())
            .collect()
    }
}
