//! Deep merge of source layers.

use serde_json::{Map, Value};

/// Merges `source` into `target`, key by key.
///
/// When both sides hold a mapping under the same key the merge recurses, so
/// siblings on the target side survive. In every other case (key absent,
/// either side a leaf, or mismatched shapes) the incoming value replaces
/// whatever `target` held.
pub fn deep_merge(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, incoming) in source {
        match (target.get_mut(&key), incoming) {
            (Some(Value::Object(existing)), Value::Object(nested)) => {
                deep_merge(existing, nested);
            }
            (_, incoming) => {
                target.insert(key, incoming);
            }
        }
    }
}

/// Folds an ordered list of layers into one mapping.
pub fn merge_layers<I>(layers: I) -> Map<String, Value>
where
    I: IntoIterator<Item = Map<String, Value>>,
{
    let mut merged = Map::new();
    for layer in layers {
        deep_merge(&mut merged, layer);
    }
    merged
}
