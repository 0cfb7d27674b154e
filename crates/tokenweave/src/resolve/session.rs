//! The per-mode resolution session.

use std::collections::{BTreeSet, HashMap};

use super::diagnostics::ResolutionReport;
use super::placeholder::{has_placeholder, placeholder_for, placeholder_paths};
use crate::store::TokenStore;
use crate::value::LiteralValue;

/// How many references deep a single resolution may nest before it stops.
pub const MAX_RESOLUTION_DEPTH: usize = 10;

/// Output of one resolution step.
struct Resolved {
    text: String,
    /// Some placeholder was left in place because the depth limit was hit.
    truncated: bool,
}

impl Resolved {
    fn complete(text: String) -> Self {
        Self {
            text,
            truncated: false,
        }
    }
}

/// Owns the resolution state for one (brand, theme) pass.
///
/// The session borrows the merged [`TokenStore`] and keeps:
///
/// - a cache from each original string to its resolved form,
/// - the set of reference paths that were looked up and not found,
/// - the set of strings whose resolution hit [`MAX_RESOLUTION_DEPTH`].
///
/// Build a new session for every mode; nothing carries over between them.
///
/// # Example
///
/// ```rust
/// use tokenweave::{ResolutionSession, TokenStore};
/// use serde_json::json;
///
/// let store = TokenStore::from_mapping(json!({
///     "color-primitives": {"blue": {"500": {"value": "#1A73E8"}}},
///     "color": {"primary": {"value": "{color-primitives.blue.500}"}},
/// }).as_object().unwrap().clone());
///
/// let mut session = ResolutionSession::new(&store);
/// assert_eq!(session.resolve("{color.primary}"), "#1A73E8");
/// ```
#[derive(Debug)]
pub struct ResolutionSession<'s> {
    store: &'s TokenStore,
    cache: HashMap<String, String>,
    unresolved: BTreeSet<String>,
    depth_limited: BTreeSet<String>,
    lookups: usize,
}

impl<'s> ResolutionSession<'s> {
    pub fn new(store: &'s TokenStore) -> Self {
        Self {
            store,
            cache: HashMap::new(),
            unresolved: BTreeSet::new(),
            depth_limited: BTreeSet::new(),
            lookups: 0,
        }
    }

    /// The store this session resolves against.
    pub fn store(&self) -> &'s TokenStore {
        self.store
    }

    /// Replaces every `{dotted.path}` in `raw` with the referenced value.
    ///
    /// Placeholders whose path does not exist stay in the output verbatim
    /// and are recorded as unresolved. The result, partial or not, is cached
    /// against the exact input string, unless resolution was cut short by
    /// [`MAX_RESOLUTION_DEPTH`].
    pub fn resolve(&mut self, raw: &str) -> String {
        self.resolve_at(raw, 0).text
    }

    fn resolve_at(&mut self, raw: &str, depth: usize) -> Resolved {
        if let Some(hit) = self.cache.get(raw) {
            return Resolved::complete(hit.clone());
        }

        let paths: Vec<String> = placeholder_paths(raw)
            .into_iter()
            .map(str::to_string)
            .collect();

        if paths.is_empty() {
            self.cache.insert(raw.to_string(), raw.to_string());
            return Resolved::complete(raw.to_string());
        }

        if depth >= MAX_RESOLUTION_DEPTH {
            if self.depth_limited.insert(raw.to_string()) {
                tracing::warn!(
                    raw,
                    depth = MAX_RESOLUTION_DEPTH,
                    "reference nesting limit reached, leaving placeholders in place"
                );
            }
            return Resolved {
                text: raw.to_string(),
                truncated: true,
            };
        }

        let mut resolved = Resolved::complete(raw.to_string());
        for path in &paths {
            if let Some((value, truncated)) = self.lookup_at(path, depth + 1) {
                resolved.text = resolved.text.replace(&placeholder_for(path), &value.to_string());
                resolved.truncated |= truncated;
            }
        }

        // A depth-limited result depends on where the chain was entered.
        if !resolved.truncated {
            self.cache.insert(raw.to_string(), resolved.text.clone());
        }
        resolved
    }

    /// Looks up a dotted path and returns its value, resolving it first when
    /// it is a string that carries placeholders.
    ///
    /// Returns `None` for missing paths and for paths that end at a group;
    /// either way the path is recorded as unresolved.
    pub fn lookup(&mut self, path: &str) -> Option<LiteralValue> {
        self.lookup_at(path, 0).map(|(value, _)| value)
    }

    fn lookup_at(&mut self, path: &str, depth: usize) -> Option<(LiteralValue, bool)> {
        self.lookups += 1;
        let store = self.store;

        let Some(value) = store.lookup(path) else {
            tracing::trace!(path, "unresolved reference");
            self.unresolved.insert(path.to_string());
            return None;
        };

        match value {
            LiteralValue::Str(s) if has_placeholder(s) => {
                let resolved = self.resolve_at(s, depth);
                Some((LiteralValue::Str(resolved.text), resolved.truncated))
            }
            other => Some((other.clone(), false)),
        }
    }

    /// Resolves a value if it is a string; other shapes are returned as-is.
    pub fn resolve_value(&mut self, value: &LiteralValue) -> LiteralValue {
        match value {
            LiteralValue::Str(s) => LiteralValue::Str(self.resolve(s)),
            other => other.clone(),
        }
    }

    /// Resolves the direct string fields of an object value.
    ///
    /// Nested objects and lists inside the object are left untouched; a
    /// non-object value is handled like [`resolve_value`](Self::resolve_value).
    pub fn resolve_fields(&mut self, value: &LiteralValue) -> LiteralValue {
        match value {
            LiteralValue::Object(fields) => LiteralValue::Object(
                fields
                    .iter()
                    .map(|(key, field)| (key.clone(), self.resolve_value(field)))
                    .collect(),
            ),
            other => self.resolve_value(other),
        }
    }

    /// Paths looked up and found absent so far.
    pub fn unresolved(&self) -> &BTreeSet<String> {
        &self.unresolved
    }

    /// Number of times the store has been walked.
    pub fn lookup_count(&self) -> usize {
        self.lookups
    }

    /// Number of cached resolutions.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Snapshot of the diagnostics gathered so far.
    pub fn report(&self) -> ResolutionReport {
        ResolutionReport {
            unresolved: self.unresolved.clone(),
            depth_limited: self.depth_limited.clone(),
            depth_limit: MAX_RESOLUTION_DEPTH,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{Map, Value};

    proptest! {
        #[test]
        fn strings_without_braces_resolve_to_themselves(s in "[^{}]*") {
            let store = TokenStore::new();
            let mut session = ResolutionSession::new(&store);
            prop_assert_eq!(session.resolve(&s), s);
        }

        #[test]
        fn resolution_is_stable_across_calls(
            targets in prop::collection::vec(0usize..6, 6),
            start in 0usize..6,
        ) {
            // Six tokens, each referencing another (cycles included) or a literal.
            let mut map = Map::new();
            for (i, target) in targets.iter().enumerate() {
                let value = if *target == i {
                    Value::String(format!("#00000{}", i))
                } else {
                    Value::String(format!("{{t{}}}", target))
                };
                let mut token = Map::new();
                token.insert("value".to_string(), value);
                map.insert(format!("t{}", i), Value::Object(token));
            }
            let store = TokenStore::from_mapping(map);
            let mut session = ResolutionSession::new(&store);

            let raw = format!("{{t{}}}", start);
            let first = session.resolve(&raw);
            let walks = session.lookup_count();
            let second = session.resolve(&raw);

            prop_assert_eq!(first, second);
            prop_assert!(walks <= MAX_RESOLUTION_DEPTH + 1);
            if session.report().depth_limited.is_empty() {
                prop_assert_eq!(session.lookup_count(), walks);
            } else {
                prop_assert!(session.lookup_count() <= 2 * walks);
            }
        }
    }
}
