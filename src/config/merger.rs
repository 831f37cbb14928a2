//! Layering of settings files.
//!
//! `config.local.yml` is applied on top of `config.yml`:
//!
//! - Mappings merge key by key, recursively
//! - Sequences and scalars in the overlay replace the base value
//! - A `null` in the overlay removes the key

use serde_yaml::{Mapping, Value};

/// Apply `overlay` on top of `base`.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    let (Value::Mapping(base_map), Value::Mapping(overlay_map)) = (base, overlay) else {
        return overlay.clone();
    };

    let mut merged = base_map.clone();
    for (key, value) in overlay_map {
        if value.is_null() {
            merged.remove(key);
            continue;
        }

        let next = match base_map.get(key) {
            Some(existing) => deep_merge(existing, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), next);
    }

    Value::Mapping(merged)
}

/// Merge layers in order; the last layer has the highest priority.
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Mapping(Mapping::new()), |acc, layer| {
            deep_merge(&acc, layer)
        })
}
