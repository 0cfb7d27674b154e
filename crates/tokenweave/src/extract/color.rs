//! Color extraction.
//!
//! Two subtrees feed the color table:
//!
//! - `color-primitives.{group}.{level}` → `color_primitives_{group}_{level}`
//! - `color.{category}.{name}` → `color_{category}_{name}`, or one level
//!   deeper as `color_{category}_{name}_{sub}`
//!
//! Values are resolved to strings. Gradients and other non-hex values pass
//! through untouched; emitters decide what to do with them.

use std::collections::BTreeMap;

use super::visible;
use crate::resolve::ResolutionSession;
use crate::store::TokenNode;
use crate::value::LiteralValue;

pub type ColorTable = BTreeMap<String, String>;

pub fn extract_colors(session: &mut ResolutionSession<'_>) -> ColorTable {
    let store = session.store();
    let mut colors = ColorTable::new();

    if let Some(primitives) = store.group("color-primitives") {
        for (group, node) in visible(primitives) {
            let Some(levels) = node.as_group() else {
                continue;
            };
            for (level, leaf) in visible(levels) {
                if let Some(value) = leaf.token_value() {
                    let key = format!("color_primitives_{}_{}", group, level);
                    colors.insert(key, resolve_text(session, value));
                }
            }
        }
    }

    if let Some(semantic) = store.group("color") {
        for (category, node) in visible(semantic) {
            let Some(names) = node.as_group() else {
                continue;
            };
            for (name, entry) in visible(names) {
                match entry {
                    TokenNode::Token(token) => {
                        let key = format!("color_{}_{}", category, name);
                        colors.insert(key, resolve_text(session, &token.value));
                    }
                    TokenNode::Group(subs) => {
                        for (sub, leaf) in visible(subs) {
                            if let Some(value) = leaf.token_value() {
                                let key = format!("color_{}_{}_{}", category, name, sub);
                                colors.insert(key, resolve_text(session, value));
                            }
                        }
                    }
                    TokenNode::Literal(_) => {}
                }
            }
        }
    }

    colors
}

fn resolve_text(session: &mut ResolutionSession<'_>, value: &LiteralValue) -> String {
    session.resolve(&value.to_string())
}
