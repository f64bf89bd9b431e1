use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use datalist_registry::{DataListSource, ErrorEvent, ErrorSink};
use datalist_types::{ConfigMap, ConfigurationField, DataListItem, ProviderDescriptor, json_kind};
use datalist_util::{is_truthy, split_pascal_casing};
use serde_json::{Value, json};
use tracing::debug;

use crate::loader::ModuleLoader;

pub const ENUM_SOURCE_KEY: &str = "enum";
pub const ENUM_TYPE_FIELD: &str = "enumType";
pub const SORT_ALPHABETICALLY_FIELD: &str = "sortAlphabetically";

/// Lists the members of an enumeration declared by a loadable module.
///
/// Configuration:
/// - `enumType`: `[moduleIdentifier, qualifiedTypeName]`.
/// - `sortAlphabetically`: sort case-insensitively instead of keeping
///   declaration order. Absent means `false`.
///
/// Each item is labelled with the member name split on pascal-case
/// boundaries and keeps the raw member name as its value.
#[derive(Debug, Clone)]
pub struct EnumDataListSource {
    loader: Arc<dyn ModuleLoader>,
}

impl EnumDataListSource {
    pub fn new(loader: Arc<dyn ModuleLoader>) -> Self {
        Self { loader }
    }

    fn member_names(&self, config: &ConfigMap) -> Result<Vec<String>> {
        let (module_id, type_name) = enum_type(config)?;

        let module = self
            .loader
            .load_module(&module_id)
            .with_context(|| format!("could not load module '{module_id}'"))?;
        let type_handle = self
            .loader
            .resolve_type(&module, &type_name)
            .with_context(|| format!("could not resolve type '{type_name}'"))?;
        let mut names = self
            .loader
            .list_member_names(&type_handle)
            .with_context(|| format!("could not list members of '{type_name}'"))?;

        if config.get(SORT_ALPHABETICALLY_FIELD).is_some_and(is_truthy) {
            sort_case_insensitive(&mut names);
        }
        Ok(names)
    }
}

/// Reads `enumType` as a `(module, type)` pair; extra elements are ignored.
fn enum_type(config: &ConfigMap) -> Result<(String, String)> {
    let value = config
        .get(ENUM_TYPE_FIELD)
        .ok_or_else(|| anyhow!("'{ENUM_TYPE_FIELD}' is not configured"))?;
    let Value::Array(parts) = value else {
        bail!("'{ENUM_TYPE_FIELD}' must be a sequence, found {}", json_kind(value));
    };
    match parts.as_slice() {
        [Value::String(module), Value::String(type_name), ..] if !module.is_empty() && !type_name.is_empty() => {
            Ok((module.clone(), type_name.clone()))
        }
        _ => bail!("'{ENUM_TYPE_FIELD}' must start with a module identifier and a type name"),
    }
}

/// Stable ordinal sort over the lowercased names; ties keep declaration order.
fn sort_case_insensitive(names: &mut [String]) {
    names.sort_by_cached_key(|name| name.to_lowercase());
}

impl DataListSource for EnumDataListSource {
    fn descriptor(&self) -> ProviderDescriptor {
        let mut cascade = ConfigMap::new();
        cascade.insert("apis".into(), json!(["modules", "modules/{module}/enumerations"]));

        ProviderDescriptor::new(ENUM_SOURCE_KEY, "Enum")
            .with_description("Select an enumeration from a module as the data source.")
            .with_icon("icon-indent")
            .with_field(
                ConfigurationField::new(ENUM_TYPE_FIELD, "Enum", "cascading-dropdown")
                    .with_description("Select the enumeration from a module.")
                    .with_renderer_config(cascade),
            )
            .with_field(
                ConfigurationField::new(SORT_ALPHABETICALLY_FIELD, "Sort alphabetically", "boolean")
                    .with_description("Sort the members alphabetically. By default the declaration order is kept."),
            )
    }

    fn get_items(&self, config: &ConfigMap, errors: &dyn ErrorSink) -> Vec<DataListItem> {
        match self.member_names(config) {
            Ok(names) => {
                debug!(provider_key = ENUM_SOURCE_KEY, item_count = names.len(), "enumeration members listed");
                names
                    .into_iter()
                    .map(|name| DataListItem::new(split_pascal_casing(&name), name))
                    .collect()
            }
            Err(error) => {
                errors.report(ErrorEvent::new(ENUM_SOURCE_KEY, error));
                Vec::new()
            }
        }
    }
}
