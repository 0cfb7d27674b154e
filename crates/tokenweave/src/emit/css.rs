//! The consolidated `tokens.css` stylesheet.

use serde::Serialize;

use super::engine::{TemplateEngine, STYLESHEET};
use super::format::{trim_float, with_unit};
use super::Artifact;
use crate::case::to_kebab_case;
use crate::error::EmitError;
use crate::extract::{shadow_dimension, ExtractedTokens, FlatTokens, PropertyValue, VariantTree};
use crate::mode::Mode;

pub const CSS_FILE: &str = "tokens.css";

#[derive(Debug, Serialize)]
struct Stylesheet {
    mode: String,
    sections: Vec<CssSection>,
}

#[derive(Debug, Serialize)]
struct CssSection {
    title: &'static str,
    properties: Vec<CssProperty>,
}

#[derive(Debug, Serialize)]
struct CssProperty {
    name: String,
    value: String,
}

fn section(title: &'static str, properties: Vec<CssProperty>) -> CssSection {
    CssSection { title, properties }
}

fn property(name: String, value: impl Into<String>) -> CssProperty {
    CssProperty {
        name,
        value: value.into(),
    }
}

/// `--{prefix}-{name}: value{unit}` for every token; `unit` only applies to
/// unitless numbers.
fn prefixed(prefix: &str, tokens: &FlatTokens, unit: &str) -> Vec<CssProperty> {
    tokens
        .iter()
        .map(|(name, value)| {
            property(
                format!("{}-{}", prefix, to_kebab_case(name)),
                with_unit(value, unit),
            )
        })
        .collect()
}

fn interactions(tree: &VariantTree) -> Vec<CssProperty> {
    let mut out = Vec::new();
    for (state, properties) in tree {
        for prop in properties {
            let value = match &prop.value {
                PropertyValue::Color(text)
                | PropertyValue::Text(text)
                | PropertyValue::Unresolved(text) => text.clone(),
                PropertyValue::Number(n) => format!("{}px", n),
                PropertyValue::Composite(_) | PropertyValue::Opaque(_) => continue,
            };
            let path: Vec<String> = prop.path.iter().map(|s| to_kebab_case(s)).collect();
            out.push(property(
                format!("interaction-{}-{}", to_kebab_case(state), path.join("-")),
                value,
            ));
        }
    }
    out
}

/// Renders the stylesheet for one mode. Empty categories are left out.
pub fn emit_css(engine: &TemplateEngine, mode: &Mode, tokens: &ExtractedTokens) -> Result<Artifact, EmitError> {
    let colors = tokens
        .colors
        .iter()
        .map(|(name, value)| property(to_kebab_case(name), value.clone()))
        .collect();
    let elevation = tokens
        .elevation
        .iter()
        .map(|(name, shadow)| {
            let blur = shadow_dimension(shadow, "blur").unwrap_or(0.0);
            property(
                format!("elevation-{}", to_kebab_case(name)),
                format!("{}px", trim_float(blur)),
            )
        })
        .collect();
    let accessibility = tokens
        .accessibility
        .iter()
        .map(|(name, value)| property(format!("accessibility-{}", to_kebab_case(name)), value.clone()))
        .collect();

    let sections = vec![
        section("COLORS", colors),
        section("SPACING", prefixed("spacing", &tokens.spacing, "px")),
        section("FONT SIZES", prefixed("font-size", &tokens.typography.font_size, "px")),
        section("LINE HEIGHTS", prefixed("line-height", &tokens.typography.line_height, "px")),
        section("FONT WEIGHTS", prefixed("font-weight", &tokens.typography.font_weight, "")),
        section("BORDER RADIUS", prefixed("border-radius", &tokens.radius, "px")),
        section("BORDER WIDTH", prefixed("border-width", &tokens.border_width, "px")),
        section("ELEVATION", elevation),
        section("MOTION - DURATIONS", prefixed("motion-duration", &tokens.motion.durations, "ms")),
        section("MOTION - EASING", prefixed("motion-easing", &tokens.motion.easing, "")),
        section(
            "MOTION - TRANSITIONS",
            prefixed("motion-transition", &tokens.motion.transitions, ""),
        ),
        section("ACCESSIBILITY", accessibility),
        section("INTERACTIONS", interactions(&tokens.interactions)),
    ];

    let sheet = Stylesheet {
        mode: mode.to_string(),
        sections: sections
            .into_iter()
            .filter(|s| !s.properties.is_empty())
            .collect(),
    };
    Ok(Artifact::css(CSS_FILE, engine.render(STYLESHEET, &sheet)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::VariantProperty;
    use crate::value::LiteralValue;

    fn render(tokens: &ExtractedTokens) -> String {
        let engine = TemplateEngine::new().unwrap();
        emit_css(&engine, &Mode::new("Luxury", "Night"), tokens)
            .unwrap()
            .contents
    }

    #[test]
    fn test_stylesheet_sections() {
        let mut tokens = ExtractedTokens::default();
        tokens
            .colors
            .insert("color_brandPrimary_primary".to_string(), "#1A73E8".to_string());
        tokens.spacing.insert("md".to_string(), LiteralValue::from(16));
        tokens.radius.insert("pill".to_string(), LiteralValue::from("999px"));
        tokens.motion.durations.insert("fast".to_string(), LiteralValue::from(150));
        tokens.elevation.insert(
            "2".to_string(),
            LiteralValue::from_json(serde_json::json!({"y": 1, "blur": "3px"})).unwrap(),
        );

        let out = render(&tokens);
        assert!(out.starts_with("/* Design Tokens - CSS Custom Properties */\n/* Mode: Luxury/Night */\n\n:root {\n"));
        assert!(out.contains("  /* ========== COLORS ========== */\n  --color-brand-primary-primary: #1A73E8;\n"));
        assert!(out.contains("  --spacing-md: 16px;\n"));
        assert!(out.contains("  --border-radius-pill: 999px;\n"));
        assert!(out.contains("  --motion-duration-fast: 150ms;\n"));
        assert!(out.contains("  --elevation-2: 3px;\n"));
        assert!(!out.contains("BORDER WIDTH"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_interaction_properties() {
        let mut tokens = ExtractedTokens::default();
        tokens.interactions.insert(
            "hover".to_string(),
            vec![
                VariantProperty {
                    path: vec!["overlayOpacity".to_string()],
                    value: PropertyValue::Number(serde_json::Number::from(4i64)),
                },
                VariantProperty {
                    path: vec!["shadow".to_string()],
                    value: PropertyValue::Opaque("{'x': ".to_string()),
                },
            ],
        );

        let out = render(&tokens);
        assert!(out.contains("  --interaction-hover-overlay-opacity: 4px;\n"));
        assert!(!out.contains("interaction-hover-shadow"));
    }
}
