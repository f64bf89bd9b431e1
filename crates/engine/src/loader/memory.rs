use std::sync::Arc;

use indexmap::IndexMap;

use super::{LoaderError, ModuleHandle, ModuleLoader, ModuleManifest, TypeDefinition};

/// A module catalog assembled in code.
///
/// Host applications register the enumerations they want to expose; tests use
/// it as a deterministic loader.
#[derive(Debug, Clone, Default)]
pub struct InMemoryModuleLoader {
    modules: IndexMap<String, Arc<ModuleManifest>>,
}

impl InMemoryModuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a whole module.
    pub fn with_module(mut self, manifest: ModuleManifest) -> Self {
        self.insert_module(manifest);
        self
    }

    /// Adds an enumeration, creating its module on first use.
    pub fn with_enumeration<S: Into<String>>(
        mut self,
        module: &str,
        type_name: &str,
        members: impl IntoIterator<Item = S>,
    ) -> Self {
        let manifest = self
            .modules
            .entry(module.to_string())
            .or_insert_with(|| Arc::new(ModuleManifest::new(module)));
        let definition = TypeDefinition::enumeration(type_name, members);
        let types = &mut Arc::make_mut(manifest).types;
        match types.iter_mut().find(|existing| existing.name == definition.name) {
            Some(existing) => *existing = definition,
            None => types.push(definition),
        }
        self
    }

    pub fn insert_module(&mut self, manifest: ModuleManifest) {
        self.modules.insert(manifest.module.clone(), Arc::new(manifest));
    }
}

impl ModuleLoader for InMemoryModuleLoader {
    fn load_module(&self, module: &str) -> Result<ModuleHandle, LoaderError> {
        self.modules
            .get(module)
            .map(|manifest| ModuleHandle::new(Arc::clone(manifest)))
            .ok_or_else(|| LoaderError::ModuleNotFound {
                module: module.to_string(),
            })
    }

    fn list_modules(&self) -> Result<Vec<String>, LoaderError> {
        Ok(self.modules.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_members_in_declaration_order() {
        let loader = InMemoryModuleLoader::new()
            .with_enumeration("Acme", "Acme.Color", ["Red", "Green", "Blue"])
            .with_enumeration("Acme", "Acme.Size", ["Small", "Large"]);

        let module = loader.load_module("Acme").expect("module");
        let color = loader.resolve_type(&module, "Acme.Color").expect("type");
        assert_eq!(loader.list_member_names(&color).expect("members"), vec!["Red", "Green", "Blue"]);
        assert_eq!(loader.list_enumerations(&module), vec!["Acme.Color", "Acme.Size"]);
        assert_eq!(loader.list_modules().expect("modules"), vec!["Acme"]);
    }

    #[test]
    fn lookups_are_exact() {
        let loader = InMemoryModuleLoader::new().with_enumeration("Acme", "Acme.Color", ["Red"]);

        assert!(matches!(loader.load_module("acme"), Err(LoaderError::ModuleNotFound { .. })));
        let module = loader.load_module("Acme").expect("module");
        assert!(matches!(
            loader.resolve_type(&module, "Color"),
            Err(LoaderError::TypeNotFound { .. })
        ));
    }

    #[test]
    fn re_registering_an_enumeration_replaces_it() {
        let loader = InMemoryModuleLoader::new()
            .with_enumeration("Acme", "Acme.Color", ["Red"])
            .with_enumeration("Acme", "Acme.Color", ["Cyan", "Magenta"]);

        let module = loader.load_module("Acme").expect("module");
        let color = loader.resolve_type(&module, "Acme.Color").expect("type");
        assert_eq!(loader.list_member_names(&color).expect("members"), vec!["Cyan", "Magenta"]);
    }
}
