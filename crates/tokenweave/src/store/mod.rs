//! The merged token tree.
//!
//! This module provides:
//!
//! - [`TokenStore`]: the in-memory tree built from ordered source layers
//! - [`TokenNode`]: a token definition, a grouping node, or a bare literal
//! - [`deep_merge`]: the layer merge that keeps siblings at every level
//! - [`read_layer`]: reading one JSON/YAML layer from disk
//!
//! Layers are merged as raw mappings first and parsed into nodes once, so a
//! token overlay that only changes `value` keeps the base layer's `type`.

mod layers;
mod merge;
mod node;

use std::path::Path;

use serde_json::{Map, Value};

pub use layers::{parse_layer, read_layer, LayerError, LayerFormat};
pub use merge::{deep_merge, merge_layers};
pub use node::{Token, TokenGroup, TokenNode};

use crate::value::LiteralValue;

/// The merged, parsed token tree for one mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStore {
    root: TokenGroup,
}

impl TokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store by merging `layers` in order, later layers winning.
    pub fn from_layers<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = Map<String, Value>>,
    {
        Self::from_mapping(merge_layers(layers))
    }

    /// Builds a store from an already-merged mapping.
    pub fn from_mapping(map: Map<String, Value>) -> Self {
        Self {
            root: node::parse_group(map),
        }
    }

    /// Reads every file in order and merges what could be read.
    ///
    /// Missing files are logged as warnings and broken files as errors;
    /// neither stops the load.
    pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Self {
        let mut merged = Map::new();
        let mut loaded = 0usize;

        for path in paths {
            let path = path.as_ref();
            match read_layer(path) {
                Ok(layer) => {
                    tracing::debug!(path = %path.display(), keys = layer.len(), "loaded layer");
                    deep_merge(&mut merged, layer);
                    loaded += 1;
                }
                Err(err) if err.is_missing() => {
                    tracing::warn!("{}", err);
                }
                Err(err) => {
                    tracing::error!("{}", err);
                }
            }
        }

        let store = Self::from_mapping(merged);
        tracing::info!(
            layers = loaded,
            of = paths.len(),
            top_level_keys = store.len(),
            "token store ready"
        );
        store
    }

    /// The root group.
    pub fn root(&self) -> &TokenGroup {
        &self.root
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Walks a dotted path and returns the node found there.
    ///
    /// Fails as soon as a key is missing or an intermediate node is not a
    /// group.
    pub fn get(&self, path: &str) -> Option<&TokenNode> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.root.get(first)?;
        for segment in segments {
            current = current.as_group()?.get(segment)?;
        }
        Some(current)
    }

    /// Returns the root-level group named `key`, if it is a group.
    pub fn group(&self, key: &str) -> Option<&TokenGroup> {
        self.root.get(key).and_then(TokenNode::as_group)
    }

    /// Raw terminal value at `path`: a token's value or a bare literal.
    ///
    /// Grouping nodes have no value, so a path ending at one yields `None`.
    /// The value is returned unresolved; see
    /// [`ResolutionSession::lookup`](crate::resolve::ResolutionSession::lookup).
    pub fn lookup(&self, path: &str) -> Option<&LiteralValue> {
        self.get(path)?.leaf_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store(value: Value) -> TokenStore {
        TokenStore::from_mapping(value.as_object().unwrap().clone())
    }

    #[test]
    fn test_lookup_token_value() {
        let store = store(json!({"color": {"red": {"value": "#f00", "type": "color"}}}));
        assert_eq!(store.lookup("color.red"), Some(&LiteralValue::from("#f00")));
    }

    #[test]
    fn test_lookup_bare_literal() {
        let store = store(json!({"spacing": {"sm": 4}}));
        assert_eq!(store.lookup("spacing.sm"), Some(&LiteralValue::from(4)));
    }

    #[test]
    fn test_lookup_group_is_absent() {
        let store = store(json!({"color": {"brand": {"primary": {"value": "#00f"}}}}));
        assert!(store.get("color.brand").is_some());
        assert_eq!(store.lookup("color.brand"), None);
    }

    #[test]
    fn test_lookup_missing_segment() {
        let store = store(json!({"color": {"red": {"value": "#f00"}}}));
        assert_eq!(store.lookup("color.blue"), None);
        assert_eq!(store.lookup("color.red.value"), None);
        assert_eq!(store.lookup("nope"), None);
        assert_eq!(store.lookup(""), None);
    }

    #[test]
    fn test_from_layers_merge_precedence() {
        let store = TokenStore::from_layers([
            json!({"spacing": {"sm": 4, "md": 8}}).as_object().unwrap().clone(),
            json!({"spacing": {"md": 12}}).as_object().unwrap().clone(),
        ]);
        assert_eq!(store.lookup("spacing.sm"), Some(&LiteralValue::from(4)));
        assert_eq!(store.lookup("spacing.md"), Some(&LiteralValue::from(12)));
    }

    #[test]
    fn test_group_accessor() {
        let store = store(json!({"spacing": {"sm": 4}, "flat": 1}));
        assert!(store.group("spacing").is_some());
        assert!(store.group("flat").is_none());
        assert!(store.group("missing").is_none());
    }

    #[test]
    fn test_load_files_skips_missing_and_broken() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.json");
        let broken = dir.path().join("broken.json");
        let overlay = dir.path().join("overlay.yaml");
        std::fs::write(&base, r#"{"spacing": {"sm": 4, "md": 8}}"#).unwrap();
        std::fs::write(&broken, "{ not json").unwrap();
        std::fs::write(&overlay, "spacing:\n  md: 12\n").unwrap();

        let store = TokenStore::load_files(&[
            base,
            dir.path().join("missing.json"),
            broken,
            overlay,
        ]);
        assert_eq!(store.lookup("spacing.sm"), Some(&LiteralValue::from(4)));
        assert_eq!(store.lookup("spacing.md"), Some(&LiteralValue::from(12)));
    }
}
