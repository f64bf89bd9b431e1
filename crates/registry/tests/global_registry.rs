use datalist_registry::{
    DataListValueConverter, Provider, ProviderRegistry, RegistryError, global, initialize, is_initialized,
};
use datalist_types::{ProviderDescriptor, ProviderFamily};
use serde_json::Value;

#[derive(Debug)]
struct Passthrough;

impl DataListValueConverter for Passthrough {
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor::new("passthrough", "Passthrough")
    }

    fn convert(&self, stored: &str) -> Option<Value> {
        Some(Value::String(stored.to_string()))
    }
}

// The process-wide registry can only be published once per test binary, so
// the whole lifecycle lives in a single test.
#[test]
fn global_registry_lifecycle() {
    assert!(!is_initialized());
    assert_eq!(global().map(|_| ()), Err(RegistryError::NotInitialized));

    let registry = ProviderRegistry::from_providers([Provider::value_converter(Passthrough)]).expect("registry");
    let published = initialize(registry).expect("first initialize succeeds");
    assert_eq!(published.list(ProviderFamily::ValueConverter).len(), 1);
    assert!(is_initialized());

    let again = initialize(ProviderRegistry::default());
    assert_eq!(again.map(|_| ()), Err(RegistryError::AlreadyInitialized));

    let current = global().expect("registry published");
    let converter = current.value_converter("passthrough").expect("converter registered");
    assert_eq!(converter.convert("abc"), Some(Value::String("abc".into())));
}
