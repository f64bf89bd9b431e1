use std::{path::PathBuf, sync::Arc, thread};

use datalist_engine::{CatalogModuleLoader, ConfigurationResolver, ModuleLoader, default_registry, resolve};
use datalist_registry::{MemoryErrorSink, ProviderRegistry};
use datalist_types::{DataListItem, RawConfiguration};
use serde_json::{Value, json};

fn catalog_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/catalog")
}

fn registry() -> ProviderRegistry {
    default_registry(Arc::new(CatalogModuleLoader::new([catalog_dir()]))).expect("registry from catalog")
}

fn current_config() -> RawConfiguration {
    serde_json::from_str(include_str!("data/dropdown_colors.json")).expect("parse json fixture")
}

fn legacy_config() -> RawConfiguration {
    serde_yaml::from_str(include_str!("data/dropdown_colors_legacy.yaml")).expect("parse yaml fixture")
}

#[test]
fn sorted_enumeration_with_dropdown_end_to_end() {
    let registry = registry();
    let sink = MemoryErrorSink::new();
    let resolved = ConfigurationResolver::new(&registry)
        .with_error_sink(&sink)
        .resolve(&current_config())
        .expect("resolve");

    let items = resolved.items().expect("items present");
    let values: Vec<_> = items.iter().map(|item| item.value.as_str()).collect();
    assert_eq!(values, vec!["Blue", "DarkOrange", "green", "Red"]);
    assert_eq!(items[1], DataListItem::new("Dark Orange", "DarkOrange"));

    assert_eq!(resolved.get("allowEmpty"), Some(&json!(false)));
    assert_eq!(resolved.keys().collect::<Vec<_>>(), vec!["items", "allowEmpty"]);
    assert!(sink.is_empty(), "unexpected errors: {:?}", sink.messages());
}

#[test]
fn legacy_selections_resolve_identically() {
    let registry = registry();
    let current = resolve(&current_config(), &registry).expect("resolve current");
    let legacy = resolve(&legacy_config(), &registry).expect("resolve legacy");
    assert_eq!(current, legacy);
}

#[test]
fn resolution_is_deterministic() {
    let registry = registry();
    let raw = current_config();
    let first = serde_json::to_string(&resolve(&raw, &registry).expect("first")).expect("serialize");
    let second = serde_json::to_string(&resolve(&raw, &registry).expect("second")).expect("serialize");
    assert_eq!(first, second);
}

#[test]
fn missing_data_source_resolves_to_empty_items() {
    let registry = registry();
    let sink = MemoryErrorSink::new();
    let raw: RawConfiguration =
        serde_json::from_value(json!({ "listEditor": [{ "key": "radio-button-list", "value": {} }] })).expect("raw");

    let resolved = ConfigurationResolver::new(&registry)
        .with_error_sink(&sink)
        .resolve(&raw)
        .expect("resolve");

    assert_eq!(resolved.get("items"), Some(&Value::Array(Vec::new())));
    assert_eq!(resolved.get("showDescriptions"), Some(&json!(true)));
    assert!(sink.is_empty());
}

#[test]
fn unresolvable_module_reports_once_and_resolution_continues() {
    let registry = registry();
    let sink = MemoryErrorSink::new();
    let raw: RawConfiguration = serde_json::from_value(json!({
        "dataSource": [{ "key": "enum", "value": { "enumType": ["Retired.Assembly", "Retired.Assembly.Color"] } }],
        "listEditor": [{ "key": "dropdown", "value": {} }]
    }))
    .expect("raw");

    let resolved = ConfigurationResolver::new(&registry)
        .with_error_sink(&sink)
        .resolve(&raw)
        .expect("resolve");

    assert_eq!(resolved.items(), Some(Vec::new()));
    assert_eq!(resolved.get("allowEmpty"), Some(&json!(true)));
    assert_eq!(sink.sources(), vec!["enum".to_string()]);
}

#[test]
fn class_types_are_not_enumerations() {
    let registry = registry();
    let sink = MemoryErrorSink::new();
    let raw: RawConfiguration = serde_json::from_value(json!({
        "dataSource": [{ "key": "enum", "value": { "enumType": ["MyAssembly", "MyAssembly.Person"] } }]
    }))
    .expect("raw");

    let resolved = ConfigurationResolver::new(&registry)
        .with_error_sink(&sink)
        .resolve(&raw)
        .expect("resolve");

    assert_eq!(resolved.items(), Some(Vec::new()));
    assert_eq!(sink.len(), 1);
    assert!(sink.messages()[0].contains("is not an enumeration"), "{:?}", sink.messages());
}

#[test]
fn declaration_order_and_labels_from_json_manifest() {
    let registry = registry();
    let raw: RawConfiguration = serde_json::from_value(json!({
        "dataSource": [{ "key": "enum", "value": { "enumType": ["Acme.Shipping", "Acme.Shipping.DeliverySpeed"] } }]
    }))
    .expect("raw");

    let items = resolve(&raw, &registry).expect("resolve").items().expect("items");
    let labels: Vec<_> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(labels, vec!["Next Day", "Standard", "ID"]);
}

#[test]
fn catalog_lists_modules_and_enumerations() {
    let loader = CatalogModuleLoader::new([catalog_dir()]);
    assert_eq!(loader.list_modules().expect("modules"), vec!["Acme.Shipping", "MyAssembly"]);

    let module = loader.load_module("MyAssembly").expect("module");
    assert_eq!(loader.list_enumerations(&module), vec!["MyAssembly.Color"]);
}

#[test]
fn concurrent_resolutions_share_one_registry() {
    let registry = registry();
    let raw = current_config();
    let expected = resolve(&raw, &registry).expect("baseline");

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| resolve(&raw, &registry).expect("resolve on worker")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("worker finished"), expected);
        }
    });
}
