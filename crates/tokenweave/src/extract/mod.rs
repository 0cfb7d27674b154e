//! Type-directed extraction.
//!
//! Each category has its own extractor that walks one part of the store,
//! resolves what it reads through the [`ResolutionSession`] and normalizes
//! the category's quirks. [`extract_all`] runs them all for one mode.
//!
//! Every extractor skips `_`-prefixed comment keys and treats a missing
//! subtree as empty (or as its fallback set). None of them fail.

mod accessibility;
mod assets;
mod color;
mod elevation;
mod fallback;
mod flat;
mod motion;
mod typography;
mod variants;

pub use accessibility::{extract_accessibility, AccessibilityTokens};
pub use assets::extract_assets;
pub use color::{extract_colors, ColorTable};
pub use elevation::{extract_elevation, shadow_dimension};
pub use fallback::{looks_serialized, parse_serialized_object};
pub use flat::{extract_flat, extract_grouped, flatten_group, FlatTokens, GroupedTokens, Leaves};
pub use motion::{apply_transition_fallbacks, extract_motion, Motion};
pub use typography::{extract_typography, FontBucket, TextStyle, Typography};
pub use variants::{
    classify, extract_components, extract_interactions, flatten_variants, PropertyValue,
    VariantProperty, VariantTree,
};

use crate::config::ExtractConfig;
use crate::resolve::ResolutionSession;
use crate::store::{TokenGroup, TokenNode};

/// Children of `group` that are not `_`-prefixed comments.
pub(crate) fn visible(group: &TokenGroup) -> impl Iterator<Item = (&String, &TokenNode)> {
    group.iter().filter(|(key, _)| !key.starts_with('_'))
}

/// Everything extracted for one mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedTokens {
    pub colors: ColorTable,
    pub spacing: FlatTokens,
    pub typography: Typography,
    pub elevation: FlatTokens,
    pub radius: FlatTokens,
    pub border_width: FlatTokens,
    pub text_case: FlatTokens,
    pub letter_spacing: GroupedTokens,
    pub layout: GroupedTokens,
    pub platforms: GroupedTokens,
    pub motion: Motion,
    pub accessibility: AccessibilityTokens,
    pub interactions: VariantTree,
    pub components: VariantTree,
    pub assets: FlatTokens,
}

impl ExtractedTokens {
    /// Per-category entry counts, in extraction order.
    pub fn counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("colors", self.colors.len()),
            ("spacing", self.spacing.len()),
            ("typography", self.typography.len()),
            ("elevation", self.elevation.len()),
            ("radius", self.radius.len()),
            ("border_width", self.border_width.len()),
            ("text_case", self.text_case.len()),
            ("letter_spacing", self.letter_spacing.len()),
            ("layout", self.layout.len()),
            ("platforms", self.platforms.len()),
            ("motion", self.motion.len()),
            ("accessibility", self.accessibility.len()),
            ("interactions", self.interactions.len()),
            ("components", self.components.len()),
            ("assets", self.assets.len()),
        ]
    }

    /// Sum of [`counts`](Self::counts).
    pub fn total(&self) -> usize {
        self.counts().iter().map(|(_, n)| n).sum()
    }
}

/// Runs every extractor against the session's store.
pub fn extract_all(session: &mut ResolutionSession<'_>, config: &ExtractConfig) -> ExtractedTokens {
    let colors = extract_colors(session);
    let interactions = extract_interactions(session, &colors);

    let tokens = ExtractedTokens {
        spacing: extract_flat(session, "spacing"),
        typography: extract_typography(session),
        elevation: extract_elevation(session),
        radius: extract_flat(session, "borderRadius"),
        border_width: extract_flat(session, "borderWidth"),
        text_case: extract_flat(session, "textCase"),
        letter_spacing: extract_grouped(session, "letterSpacing", Leaves::TokensOnly),
        layout: extract_grouped(session, "layout", Leaves::TokensOnly),
        platforms: extract_grouped(session, "platforms", Leaves::TokensAndLiterals),
        motion: extract_motion(session),
        accessibility: extract_accessibility(session),
        components: extract_components(session, &config.component_roots),
        assets: extract_assets(session),
        colors,
        interactions,
    };

    for (category, count) in tokens.counts() {
        tracing::debug!(category, count, "extracted");
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TokenStore;
    use serde_json::json;

    fn config() -> ExtractConfig {
        ExtractConfig {
            component_roots: vec!["button".to_string(), "card".to_string()],
        }
    }

    #[test]
    fn test_end_to_end_brand_color() {
        let store = TokenStore::from_layers([
            json!({"color-primitives": {"blue": {"500": {"value": "#1A73E8", "type": "color"}}}})
                .as_object()
                .unwrap()
                .clone(),
            json!({"color": {"brandPrimary": {"primary": {"value": "{color-primitives.blue.500}"}}}})
                .as_object()
                .unwrap()
                .clone(),
        ]);
        let mut session = ResolutionSession::new(&store);
        let tokens = extract_all(&mut session, &config());

        assert_eq!(tokens.colors["color_brandPrimary_primary"], "#1A73E8");
        assert!(session.report().is_clean());
    }

    #[test]
    fn test_empty_store_yields_fallbacks_only() {
        let store = TokenStore::new();
        let mut session = ResolutionSession::new(&store);
        let tokens = extract_all(&mut session, &config());

        assert!(tokens.colors.is_empty());
        assert!(tokens.components.is_empty());
        assert_eq!(tokens.typography.font_weight.len(), 5);
        assert_eq!(tokens.motion.durations.len(), 3);
        assert_eq!(tokens.accessibility.len(), 8);
        assert_eq!(tokens.total(), 5 + 6 + 8);
    }

    #[test]
    fn test_components_use_configured_roots() {
        let store = TokenStore::from_mapping(
            json!({
                "button": {"primary": {"background": {"value": "#000"}}},
                "toast": {"info": {"background": {"value": "#111"}}},
            })
            .as_object()
            .unwrap()
            .clone(),
        );
        let mut session = ResolutionSession::new(&store);
        let tokens = extract_all(&mut session, &config());

        assert!(tokens.components.contains_key("button"));
        assert!(!tokens.components.contains_key("toast"));
    }
}
