//! Accessibility extraction.

use std::collections::BTreeMap;

use super::visible;
use crate::resolve::ResolutionSession;
use crate::store::TokenGroup;

const FALLBACK: [(&str, &str); 8] = [
    ("wcag_aa_text_on_primary", "#ffffff"),
    ("wcag_aa_text_on_error", "#ffffff"),
    ("wcag_aa_text_on_success", "#ffffff"),
    ("wcag_aa_text_on_warning", "#000000"),
    ("high_contrast_primary", "#0033cc"),
    ("high_contrast_text", "#000000"),
    ("focus_indicator", "#ffff00"),
    ("focus_indicator_dark", "#ffff00"),
];

pub type AccessibilityTokens = BTreeMap<String, String>;

/// Collects `color-primitives.Accessibility` and the root `Accessibility`
/// group (the latter wins on name clashes). Falls back to a standard WCAG set
/// when both are empty.
pub fn extract_accessibility(session: &mut ResolutionSession<'_>) -> AccessibilityTokens {
    let store = session.store();
    let sources = [
        store
            .group("color-primitives")
            .and_then(|primitives| primitives.get("Accessibility"))
            .and_then(|node| node.as_group()),
        store.group("Accessibility"),
    ];

    let mut tokens = AccessibilityTokens::new();
    for group in sources.into_iter().flatten() {
        collect(session, group, &mut tokens);
    }

    if tokens.is_empty() {
        tracing::debug!("no accessibility tokens in source, using the WCAG defaults");
        tokens = FALLBACK
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
    }
    tokens
}

fn collect(session: &mut ResolutionSession<'_>, group: &TokenGroup, into: &mut AccessibilityTokens) {
    for (name, node) in visible(group) {
        if let Some(value) = node.token_value() {
            let resolved = session.resolve(&value.to_string());
            into.insert(name.clone(), resolved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TokenStore;
    use serde_json::json;

    #[test]
    fn test_fallback_set() {
        let store = TokenStore::new();
        let mut session = ResolutionSession::new(&store);
        let tokens = extract_accessibility(&mut session);

        assert_eq!(tokens.len(), 8);
        assert_eq!(tokens["wcag_aa_text_on_warning"], "#000000");
        assert_eq!(tokens["focus_indicator"], "#ffff00");
    }

    #[test]
    fn test_both_sources_resolved_root_wins() {
        let store = TokenStore::from_mapping(
            json!({
                "color-primitives": {
                    "white": {"value": "#FFFFFF"},
                    "Accessibility": {
                        "focus_ring": {"value": "{color-primitives.white}"},
                        "min_contrast": {"value": 4.5},
                    },
                },
                "Accessibility": {"focus_ring": {"value": "#FFFF00"}},
            })
            .as_object()
            .unwrap()
            .clone(),
        );
        let mut session = ResolutionSession::new(&store);
        let tokens = extract_accessibility(&mut session);

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens["focus_ring"], "#FFFF00");
        assert_eq!(tokens["min_contrast"], "4.5");
    }
}
