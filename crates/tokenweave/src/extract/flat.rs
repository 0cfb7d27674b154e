//! Flat and two-level grouped categories.
//!
//! Flat: `spacing`, `borderRadius`, `borderWidth`, `textCase`, plus the
//! typography size tables. Grouped: `letterSpacing`, `layout`, `platforms`.

use std::collections::BTreeMap;

use super::visible;
use crate::resolve::ResolutionSession;
use crate::store::{TokenGroup, TokenNode};

use crate::value::LiteralValue;

/// Name → resolved value.
pub type FlatTokens = BTreeMap<String, LiteralValue>;

/// Category → name → resolved value.
pub type GroupedTokens = BTreeMap<String, FlatTokens>;

/// Which leaves a category accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leaves {
    /// Only `{value: ...}` token definitions.
    TokensOnly,
    /// Token definitions and bare literals.
    TokensAndLiterals,
}

impl Leaves {
    fn value_of<'a>(self, node: &'a TokenNode) -> Option<&'a LiteralValue> {
        match self {
            Leaves::TokensOnly => node.token_value(),
            Leaves::TokensAndLiterals => node.leaf_value(),
        }
    }
}

/// Resolves the direct token children of `group`.
pub fn flatten_group(
    session: &mut ResolutionSession<'_>,
    group: &TokenGroup,
    leaves: Leaves,
) -> FlatTokens {
    visible(group)
        .filter_map(|(name, node)| {
            leaves
                .value_of(node)
                .map(|value| (name.clone(), session.resolve_fields(value)))
        })
        .collect()
}

/// Resolves the direct token children of the root group `key`.
pub fn extract_flat(session: &mut ResolutionSession<'_>, key: &str) -> FlatTokens {
    match session.store().group(key) {
        Some(group) => flatten_group(session, group, Leaves::TokensOnly),
        None => FlatTokens::new(),
    }
}

/// Resolves `key.{category}.{name}` into a two-level map.
///
/// Categories without any accepted leaf are dropped.
pub fn extract_grouped(
    session: &mut ResolutionSession<'_>,
    key: &str,
    leaves: Leaves,
) -> GroupedTokens {
    let Some(root) = session.store().group(key) else {
        return GroupedTokens::new();
    };

    let mut grouped = GroupedTokens::new();
    for (category, node) in visible(root) {
        let Some(children) = node.as_group() else {
            continue;
        };
        let tokens = flatten_group(session, children, leaves);
        if !tokens.is_empty() {
            grouped.insert(category.clone(), tokens);
        }
    }
    grouped
}
