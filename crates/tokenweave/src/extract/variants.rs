//! Interaction-state and component extraction.
//!
//! Both categories are variant trees of arbitrary depth
//! (`button.danger.active.background`). A token or bare literal is a leaf;
//! a group is one more level of nesting. Leaves are flattened into
//! [`VariantProperty`] values carrying their path below the root and a
//! classified [`PropertyValue`].

use std::collections::BTreeMap;

use serde_json::Number;

use super::color::ColorTable;
use super::fallback::{looks_serialized, parse_serialized_object};
use super::visible;
use crate::resolve::{has_placeholder, placeholder_paths, whole_reference, ResolutionSession};
use crate::store::{TokenGroup, TokenNode};
use crate::value::LiteralValue;

/// Property names that suggest a color value.
const COLOR_HINTS: [&str; 4] = ["color", "background", "border", "text"];

/// A resolved leaf value, classified for emission.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// A `#`-prefixed color.
    Color(String),
    Number(Number),
    Text(String),
    /// An object value (or a string that parsed as one), fields resolved.
    Composite(BTreeMap<String, LiteralValue>),
    /// Placeholders remain after resolution.
    Unresolved(String),
    /// Looks like a serialized object but could not be parsed.
    Opaque(String),
}

/// One leaf of a variant tree.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantProperty {
    /// Keys below the root, ending with the property name.
    pub path: Vec<String>,
    pub value: PropertyValue,
}

impl VariantProperty {
    /// The property name (last path segment).
    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }
}

/// Root name → flattened properties in key order.
pub type VariantTree = BTreeMap<String, Vec<VariantProperty>>;

/// Extracts `interaction.{state}...`.
///
/// Properties whose value stays unresolved and whose name suggests a color
/// are matched against the extracted color table as a last resort.
pub fn extract_interactions(session: &mut ResolutionSession<'_>, colors: &ColorTable) -> VariantTree {
    let Some(states) = session.store().group("interaction") else {
        return VariantTree::new();
    };

    let mut tree = VariantTree::new();
    for (state, node) in visible(states) {
        let Some(group) = node.as_group() else {
            continue;
        };
        let mut properties = flatten_variants(session, group);
        for property in &mut properties {
            recover_color(property, colors);
        }
        tree.insert(state.clone(), properties);
    }
    tree
}

/// Extracts every configured component root that exists in the store.
pub fn extract_components(session: &mut ResolutionSession<'_>, roots: &[String]) -> VariantTree {
    let store = session.store();
    let mut tree = VariantTree::new();
    for root in roots {
        if let Some(group) = store.group(root) {
            let properties = flatten_variants(session, group);
            tree.insert(root.clone(), properties);
        }
    }
    tree
}

/// Flattens a variant tree into its leaves, depth-first in key order.
pub fn flatten_variants(session: &mut ResolutionSession<'_>, group: &TokenGroup) -> Vec<VariantProperty> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    walk(session, group, &mut path, &mut out);
    out
}

fn walk(
    session: &mut ResolutionSession<'_>,
    group: &TokenGroup,
    path: &mut Vec<String>,
    out: &mut Vec<VariantProperty>,
) {
    for (key, node) in visible(group) {
        path.push(key.clone());
        match node {
            TokenNode::Group(children) => walk(session, children, path, out),
            leaf => {
                if let Some(value) = leaf.leaf_value() {
                    out.push(VariantProperty {
                        path: path.clone(),
                        value: classify(session, value),
                    });
                }
            }
        }
        path.pop();
    }
}

/// Resolves and classifies one leaf value.
pub fn classify(session: &mut ResolutionSession<'_>, value: &LiteralValue) -> PropertyValue {
    match value {
        LiteralValue::Num(n) => PropertyValue::Number(n.clone()),
        LiteralValue::Bool(_) | LiteralValue::List(_) => PropertyValue::Text(value.to_string()),
        LiteralValue::Object(_) => composite(session, value),
        LiteralValue::Str(raw) => classify_str(session, raw),
    }
}

fn classify_str(session: &mut ResolutionSession<'_>, raw: &str) -> PropertyValue {
    // A whole reference keeps the referenced value's shape.
    if let Some(path) = whole_reference(raw) {
        return match session.lookup(path) {
            Some(LiteralValue::Str(resolved)) => classify_text(resolved),
            Some(found) => classify(session, &found),
            None => PropertyValue::Unresolved(raw.to_string()),
        };
    }

    if let Some(fields) = parse_serialized_object(raw) {
        return composite(session, &LiteralValue::Object(fields));
    }
    if looks_serialized(raw) {
        return PropertyValue::Opaque(raw.to_string());
    }
    classify_text(session.resolve(raw))
}

fn classify_text(text: String) -> PropertyValue {
    if has_placeholder(&text) {
        PropertyValue::Unresolved(text)
    } else if text.starts_with('#') {
        PropertyValue::Color(text)
    } else {
        PropertyValue::Text(text)
    }
}

fn composite(session: &mut ResolutionSession<'_>, value: &LiteralValue) -> PropertyValue {
    match session.resolve_fields(value) {
        LiteralValue::Object(fields) => PropertyValue::Composite(fields),
        other => PropertyValue::Text(other.to_string()),
    }
}

fn recover_color(property: &mut VariantProperty, colors: &ColorTable) {
    let PropertyValue::Unresolved(text) = &property.value else {
        return;
    };
    let name = property.name().to_lowercase();
    if !COLOR_HINTS.iter().any(|hint| name.contains(hint)) {
        return;
    }
    if let Some(color) = match_color(text, colors) {
        tracing::debug!(property = %property.path.join("."), %color, "matched unresolved color by name");
        property.value = PropertyValue::Color(color);
    }
}

/// Finds an extracted color whose key contains a placeholder path of `text`
/// (dots and dashes read as underscores, case-insensitive).
fn match_color(text: &str, colors: &ColorTable) -> Option<String> {
    for path in placeholder_paths(text) {
        let wanted = path.replace(['.', '-'], "_").to_lowercase();
        let found = colors
            .iter()
            .find(|(key, value)| key.to_lowercase().contains(&wanted) && value.starts_with('#'));
        if let Some((_, value)) = found {
            return Some(value.clone());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TokenStore;
    use serde_json::{json, Value};

    fn store(value: Value) -> TokenStore {
        TokenStore::from_mapping(value.as_object().unwrap().clone())
    }

    fn find<'a>(properties: &'a [VariantProperty], path: &str) -> &'a PropertyValue {
        &properties
            .iter()
            .find(|p| p.path.join(".") == path)
            .unwrap_or_else(|| panic!("no property at {}", path))
            .value
    }

    #[test]
    fn test_nested_component_variants_are_flattened() {
        let store = store(json!({
            "color": {"red": {"value": "#D00"}},
            "radius": {"md": {"value": 8}},
            "button": {
                "danger": {
                    "default": {"background": {"value": "{color.red}", "type": "color"}},
                    "active": {"background": {"value": "#A00"}, "radius": {"value": "{radius.md}"}},
                },
                "_comment": "ignored",
            },
        }));
        let mut session = ResolutionSession::new(&store);
        let tree = extract_components(&mut session, &["button".to_string(), "modal".to_string()]);

        assert_eq!(tree.len(), 1);
        let button = &tree["button"];
        assert_eq!(button.len(), 3);
        assert_eq!(
            find(button, "danger.default.background"),
            &PropertyValue::Color("#D00".to_string())
        );
        assert_eq!(find(button, "danger.active.radius"), &PropertyValue::Number(Number::from(8i64)));
    }

    #[test]
    fn test_classification() {
        let store = store(json!({"c": {"value": "#fff"}}));
        let mut session = ResolutionSession::new(&store);

        assert_eq!(
            classify(&mut session, &LiteralValue::from("solid {c}")),
            PropertyValue::Text("solid #fff".to_string())
        );
        assert_eq!(
            classify(&mut session, &LiteralValue::from("{missing.ref}")),
            PropertyValue::Unresolved("{missing.ref}".to_string())
        );
        assert_eq!(
            classify(&mut session, &LiteralValue::from("{'fill': broken")),
            PropertyValue::Opaque("{'fill': broken".to_string())
        );
        assert_eq!(
            classify(&mut session, &LiteralValue::from(true)),
            PropertyValue::Text("true".to_string())
        );

        match classify(&mut session, &LiteralValue::from("{'fill': '{c}', 'padding': 8}")) {
            PropertyValue::Composite(fields) => {
                assert_eq!(fields["fill"], LiteralValue::from("#fff"));
                assert_eq!(fields["padding"], LiteralValue::from(8));
            }
            other => panic!("expected composite, got {:?}", other),
        }
    }

    #[test]
    fn test_object_leaf_is_composite_with_fields_resolved() {
        let store = store(json!({
            "c": {"value": "#123456"},
            "card": {"elevated": {"shadow": {"value": {"color": "{c}", "blur": 4}}}},
        }));
        let mut session = ResolutionSession::new(&store);
        let tree = extract_components(&mut session, &["card".to_string()]);

        match find(&tree["card"], "elevated.shadow") {
            PropertyValue::Composite(fields) => assert_eq!(fields["color"], LiteralValue::from("#123456")),
            other => panic!("expected composite, got {:?}", other),
        }
    }

    #[test]
    fn test_interaction_color_recovered_from_color_table() {
        let store = store(json!({
            "interaction": {
                "hover": {
                    "background": {"value": "{brandPrimary.hover}"},
                    "opacity": {"value": 0.08},
                    "label": {"value": "{brandPrimary.hover}"},
                },
                "pressed": {"value": "not a group"},
            },
        }));
        let mut colors = ColorTable::new();
        colors.insert("color_brandPrimary_hover".to_string(), "#1557B0".to_string());

        let mut session = ResolutionSession::new(&store);
        let tree = extract_interactions(&mut session, &colors);

        assert_eq!(tree.len(), 1);
        let hover = &tree["hover"];
        assert_eq!(find(hover, "background"), &PropertyValue::Color("#1557B0".to_string()));
        // No color hint in the name, so it stays unresolved.
        assert_eq!(
            find(hover, "label"),
            &PropertyValue::Unresolved("{brandPrimary.hover}".to_string())
        );
        assert!(matches!(find(hover, "opacity"), PropertyValue::Number(_)));
    }
}
