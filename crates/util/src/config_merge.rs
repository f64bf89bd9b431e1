//! First-writer-wins merging of configuration maps.
//!
//! Used by the resolution pipeline when layering editor settings over the
//! materialized items, and by providers composing their own default blocks.

use datalist_types::ConfigMap;

/// Copies every entry of `source` whose key is not yet present in `target`.
///
/// Existing keys in `target` are never overwritten. New keys are appended in
/// `source` order. Returns the number of entries written.
pub fn merge_missing(target: &mut ConfigMap, source: &ConfigMap) -> usize {
    let mut written = 0;
    for (key, value) in source {
        if !target.contains_key(key) {
            target.insert(key.clone(), value.clone());
            written += 1;
        }
    }
    written
}

/// Merges `overrides` beneath `base`.
///
/// `base` wins over every override for a shared key; among the overrides,
/// earlier maps win over later ones. The result lists the keys of `base`
/// first, then keys introduced by each override in order.
///
/// # Example
/// ```rust
/// use datalist_types::ConfigMap;
/// use datalist_util::merge_defaults;
/// use serde_json::json;
///
/// let base: ConfigMap = [("allowEmpty".to_string(), json!(false))].into_iter().collect();
/// let defaults: ConfigMap = [
///     ("allowEmpty".to_string(), json!(true)),
///     ("maxItems".to_string(), json!(0)),
/// ]
/// .into_iter()
/// .collect();
///
/// let merged = merge_defaults(&base, &[&defaults]);
/// assert_eq!(merged["allowEmpty"], json!(false));
/// assert_eq!(merged["maxItems"], json!(0));
/// ```
pub fn merge_defaults(base: &ConfigMap, overrides: &[&ConfigMap]) -> ConfigMap {
    let mut merged = base.clone();
    for layer in overrides {
        merge_missing(&mut merged, layer);
    }
    merged
}
