//! Android resource documents.
//!
//! Each category becomes a `<resources>` file of `<color>`, `<dimen>`,
//! `<integer>` and `<string>` items. Names are snake_case and prefixed per
//! category; item text goes through the template's `xml_escape` filter.

use serde::Serialize;

use super::engine::{TemplateEngine, RESOURCES};
use super::format::{
    by_numeric_name, by_numeric_suffix, capitalize, leading_number, numeric_suffix,
    resource_color, resource_name, trim_float, with_unit,
};
use super::Artifact;
use crate::case::to_snake_case;
use crate::error::EmitError;
use crate::extract::{
    shadow_dimension, AccessibilityTokens, ColorTable, ExtractedTokens, FlatTokens, GroupedTokens,
    Motion, PropertyValue, Typography, VariantTree,
};
use crate::value::LiteralValue;

/// Files [`emit_xml`] can write into a single-mode output directory.
pub const XML_FILES: [&str; 13] = [
    "colors.xml",
    "dimens.xml",
    "radius.xml",
    "typography.xml",
    "attrs.xml",
    "animations.xml",
    "elevation.xml",
    "interactions.xml",
    "components.xml",
    "layout.xml",
    "platforms.xml",
    "letter_spacing.xml",
    "assets.xml",
];

#[derive(Debug, Serialize)]
struct ResourceFile {
    header: &'static str,
    sections: Vec<ResourceSection>,
}

impl ResourceFile {
    fn new(header: &'static str, sections: Vec<ResourceSection>) -> Self {
        ResourceFile {
            header,
            sections: sections.into_iter().filter(|s| !s.items.is_empty()).collect(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct ResourceSection {
    comment: Option<String>,
    items: Vec<Resource>,
}

impl ResourceSection {
    fn commented(comment: impl Into<String>) -> Self {
        ResourceSection {
            comment: Some(comment.into()),
            items: Vec::new(),
        }
    }

    fn push(&mut self, tag: &'static str, name: impl Into<String>, value: impl Into<String>) {
        self.items.push(Resource {
            tag,
            name: name.into(),
            value: value.into(),
        });
    }
}

#[derive(Debug, Serialize)]
struct Resource {
    tag: &'static str,
    name: String,
    value: String,
}

/// Renders every resource document for one mode. Layout, platform, letter
/// spacing and asset documents are only produced when they have content.
pub fn emit_xml(engine: &TemplateEngine, tokens: &ExtractedTokens) -> Result<Vec<Artifact>, EmitError> {
    let mut files = vec![
        ("colors.xml", colors(&tokens.colors)),
        ("dimens.xml", dimens(&tokens.spacing, &tokens.border_width)),
        ("radius.xml", radius(&tokens.radius)),
        ("typography.xml", typography(&tokens.typography, &tokens.text_case)),
        ("attrs.xml", attrs(&tokens.accessibility)),
        ("animations.xml", animations(&tokens.motion)),
        ("elevation.xml", elevation(&tokens.elevation)),
        ("interactions.xml", variants(INTERACTIONS, &tokens.interactions)),
        ("components.xml", variants(COMPONENTS, &tokens.components)),
    ];
    if !tokens.layout.is_empty() {
        files.push(("layout.xml", layout(&tokens.layout)));
    }
    if !tokens.platforms.is_empty() {
        files.push(("platforms.xml", platforms(&tokens.platforms)));
    }
    if !tokens.letter_spacing.is_empty() {
        files.push(("letter_spacing.xml", letter_spacing(&tokens.letter_spacing)));
    }
    if !tokens.assets.is_empty() {
        files.push(("assets.xml", assets(&tokens.assets)));
    }

    files
        .into_iter()
        .map(|(file_name, file)| Ok(Artifact::xml(file_name, engine.render(RESOURCES, &file)?)))
        .collect()
}

fn colors(colors: &ColorTable) -> ResourceFile {
    let mut section = ResourceSection::default();
    for (name, value) in colors {
        match resource_color(value) {
            Some(color) => section.push("color", to_snake_case(name), color),
            None => tracing::debug!(%name, %value, "no android color form, skipped"),
        }
    }
    ResourceFile::new("COLOR TOKENS - Generated from design tokens", vec![section])
}

fn dimens(spacing: &FlatTokens, border_width: &FlatTokens) -> ResourceFile {
    let mut names: Vec<&String> = spacing.keys().collect();
    names.sort_by(|a, b| by_numeric_suffix(a, b));

    let mut sections: Vec<ResourceSection> = Vec::new();
    let mut current: Option<Option<u64>> = None;
    for name in names {
        let suffix = numeric_suffix(name);
        if current != Some(suffix) {
            let label = name.rsplit(['-', '_']).next().unwrap_or(name.as_str());
            sections.push(ResourceSection::commented(format!(
                "{} (variants: spacing, compact, spacious)",
                label
            )));
            current = Some(suffix);
        }
        if let Some(section) = sections.last_mut() {
            section.push(
                "dimen",
                resource_name("spacing", name),
                with_unit(&spacing[name], "dp"),
            );
        }
    }

    let mut borders = ResourceSection::commented("BORDER WIDTH TOKENS");
    for (name, value) in border_width {
        borders.push("dimen", format!("border_{}", to_snake_case(name)), with_unit(value, "dp"));
    }
    sections.push(borders);

    ResourceFile::new("SPACING TOKENS - Organized by token name suffix", sections)
}

fn radius(radius: &FlatTokens) -> ResourceFile {
    let mut names: Vec<&String> = radius.keys().collect();
    names.sort_by(|a, b| by_numeric_name(a, b));

    let mut section = ResourceSection::default();
    for name in names {
        section.push(
            "dimen",
            format!("border_radius_{}", to_snake_case(name)),
            with_unit(&radius[name], "dp"),
        );
    }
    ResourceFile::new("BORDER RADIUS TOKENS - Corner rounding values", vec![section])
}

fn numbered(tokens: &FlatTokens, comment: &str, prefix: &str, unit: &str) -> ResourceSection {
    let mut names: Vec<&String> = tokens.keys().collect();
    names.sort_by(|a, b| by_numeric_name(a, b));

    let mut section = ResourceSection::commented(comment);
    for name in names {
        section.push(
            "dimen",
            format!("{}_{}", prefix, to_snake_case(name)),
            with_unit(&tokens[name], unit),
        );
    }
    section
}

fn typography(typography: &Typography, text_case: &FlatTokens) -> ResourceFile {
    let mut compositions = ResourceSection::commented("TYPOGRAPHY COMPOSITIONS (font families, letter spacing)");
    for (name, style) in &typography.compositions {
        let name = to_snake_case(name);
        if let Some(bucket) = style.font_family {
            compositions.push("string", format!("typography_{}_font_family", name), bucket.as_str());
        }
        if let Some(spacing) = &style.letter_spacing {
            compositions.push(
                "string",
                format!("typography_{}_letter_spacing", name),
                spacing.to_string(),
            );
        }
    }

    let mut weights = ResourceSection::commented("FONT WEIGHTS");
    for (name, value) in &typography.font_weight {
        weights.push(
            "integer",
            format!("font_weight_{}", to_snake_case(name)),
            leading_number(value).unwrap_or_else(|| value.to_string()),
        );
    }

    let mut cases = ResourceSection::commented("TEXT CASE");
    for (name, value) in text_case {
        cases.push("string", format!("text_case_{}", to_snake_case(name)), value.to_string());
    }

    ResourceFile::new(
        "TYPOGRAPHY TOKENS - Font families, sizes, line heights, weights and text case",
        vec![
            compositions,
            numbered(&typography.font_size, "FONT SIZES", "font_size", "sp"),
            numbered(&typography.line_height, "LINE HEIGHTS", "line_height", "sp"),
            weights,
            cases,
        ],
    )
}

/// Accessibility groups in priority order; a token lands in the first group
/// whose keywords its name contains.
const ACCESSIBILITY_GROUPS: [(&str, &[&str]); 3] = [
    ("WCAG AA Compliant Text Pairs", &["wcag"]),
    ("Focus Indicators (for keyboard navigation)", &["focus"]),
    ("High Contrast Mode", &["high", "contrast"]),
];

fn attrs(accessibility: &AccessibilityTokens) -> ResourceFile {
    let mut sections: Vec<ResourceSection> = ACCESSIBILITY_GROUPS
        .iter()
        .map(|(comment, _)| ResourceSection::commented(*comment))
        .collect();
    sections.push(ResourceSection::commented("Other Accessibility Tokens"));

    for (name, value) in accessibility {
        let lower = name.to_lowercase();
        let group = ACCESSIBILITY_GROUPS
            .iter()
            .position(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .unwrap_or(ACCESSIBILITY_GROUPS.len());

        let mut snake = to_snake_case(name);
        if group == 0 {
            snake = snake.replace("wcag_aa_text_on_", "text_on_");
        }
        let tag = if value.starts_with('#') { "color" } else { "string" };
        sections[group].push(tag, format!("accessibility_{}", snake), value.clone());
    }

    ResourceFile::new(
        "ACCESSIBILITY TOKENS - WCAG AA colors, focus indicators, high contrast",
        sections,
    )
}

fn animations(motion: &Motion) -> ResourceFile {
    let mut durations = ResourceSection::commented("Durations (milliseconds)");
    for (name, value) in &motion.durations {
        let name = format!("motion_duration_{}", to_snake_case(name));
        match leading_number(value) {
            Some(ms) => durations.push("integer", name, ms),
            None => durations.push("string", name, value.to_string()),
        }
    }

    let mut easing = ResourceSection::commented("Easing Functions");
    for (name, value) in &motion.easing {
        easing.push("string", format!("motion_easing_{}", to_snake_case(name)), value.to_string());
    }

    let mut transitions = ResourceSection::commented("Transitions (combined duration + easing)");
    for (name, value) in &motion.transitions {
        transitions.push(
            "string",
            format!("motion_transition_{}", to_snake_case(name)),
            value.to_string(),
        );
    }

    ResourceFile::new(
        "MOTION TOKENS - Durations, easing functions, and transitions",
        vec![durations, easing, transitions],
    )
}

fn elevation(elevation: &FlatTokens) -> ResourceFile {
    let mut names: Vec<&String> = elevation.keys().collect();
    names.sort_by(|a, b| by_numeric_name(a, b));

    let mut section = ResourceSection::default();
    for name in names {
        let offset = shadow_dimension(&elevation[name], "y").unwrap_or(0.0);
        section.push(
            "dimen",
            format!("elevation_{}", to_snake_case(name)),
            format!("{}dp", trim_float(offset)),
        );
    }
    ResourceFile::new("ELEVATION TOKENS - Shadow vertical offsets", vec![section])
}

struct VariantDocument {
    header: &'static str,
    prefix: &'static str,
    heading: &'static str,
}

const INTERACTIONS: VariantDocument = VariantDocument {
    header: "INTERACTION STATE TOKENS - Hover, active, focus, disabled",
    prefix: "interaction",
    heading: "State",
};

const COMPONENTS: VariantDocument = VariantDocument {
    header: "COMPONENT TOKENS - Buttons, cards, notifications, forms",
    prefix: "component",
    heading: "Component",
};

/// Interaction states and components share one layout: a section per root,
/// one item per flattened property.
fn variants(document: VariantDocument, tree: &VariantTree) -> ResourceFile {
    let sections = tree
        .iter()
        .map(|(root, properties)| {
            let mut section =
                ResourceSection::commented(format!("{} {}", capitalize(root), document.heading));
            for property in properties {
                let mut segments = vec![to_snake_case(root)];
                segments.extend(property.path.iter().map(|s| to_snake_case(s)));
                let identifier = segments.join("_");
                let name = format!("{}_{}", document.prefix, identifier);

                match &property.value {
                    PropertyValue::Color(color) => section.push("color", name, color.clone()),
                    PropertyValue::Number(n) => section.push("dimen", name, format!("{}dp", n)),
                    PropertyValue::Text(text) | PropertyValue::Unresolved(text) => {
                        section.push("string", name, text.clone())
                    }
                    // Serialized objects are no valid resource value; the
                    // identifier stands in for them.
                    PropertyValue::Composite(_) | PropertyValue::Opaque(_) => {
                        section.push("string", name, identifier)
                    }
                }
            }
            section
        })
        .collect();
    ResourceFile::new(document.header, sections)
}

fn grouped(
    tokens: &GroupedTokens,
    prefix: &str,
    heading: impl Fn(&str) -> String,
    item: impl Fn(&LiteralValue) -> (&'static str, String),
) -> Vec<ResourceSection> {
    tokens
        .iter()
        .map(|(category, values)| {
            let mut section = ResourceSection::commented(heading(category));
            for (name, value) in values {
                let (tag, text) = item(value);
                section.push(
                    tag,
                    format!("{}_{}_{}", prefix, to_snake_case(category), to_snake_case(name)),
                    text,
                );
            }
            section
        })
        .collect()
}

fn layout(layout: &GroupedTokens) -> ResourceFile {
    ResourceFile::new(
        "LAYOUT TOKENS - Breakpoints, spacing modes, touch targets",
        grouped(layout, "layout", capitalize, |value| {
            if value.as_f64().is_some() {
                ("dimen", with_unit(value, "dp"))
            } else {
                ("string", value.to_string())
            }
        }),
    )
}

fn platforms(platforms: &GroupedTokens) -> ResourceFile {
    ResourceFile::new(
        "PLATFORM-SPECIFIC TOKENS",
        grouped(
            platforms,
            "platform",
            |platform| format!("{} Platform", platform.to_uppercase()),
            |value| ("string", value.to_string()),
        ),
    )
}

fn letter_spacing(letter_spacing: &GroupedTokens) -> ResourceFile {
    ResourceFile::new(
        "LETTER SPACING TOKENS - Fine-grained typography control",
        grouped(letter_spacing, "letter_spacing", capitalize, |value| {
            ("dimen", with_unit(value, "em"))
        }),
    )
}

fn assets(assets: &FlatTokens) -> ResourceFile {
    let mut section = ResourceSection::default();
    for (name, value) in assets {
        section.push("string", resource_name("asset", name), value.to_string());
    }
    ResourceFile::new("ASSET TOKENS", vec![section])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{FontBucket, TextStyle, VariantProperty};
    use std::collections::BTreeMap;

    fn render(file_name: &str, tokens: &ExtractedTokens) -> Option<String> {
        let engine = TemplateEngine::new().unwrap();
        emit_xml(&engine, tokens)
            .unwrap()
            .into_iter()
            .find(|artifact| artifact.file_name == file_name)
            .map(|artifact| artifact.contents)
    }

    #[test]
    fn test_colors_degrade_gradients_and_skip_non_colors() {
        let mut tokens = ExtractedTokens::default();
        tokens
            .colors
            .insert("color_brandPrimary_primary".to_string(), "#1A73E8".to_string());
        tokens.colors.insert(
            "color_overlay_fade".to_string(),
            "linear-gradient(180deg, #1A1A1A95 0%, #000000 100%)".to_string(),
        );
        tokens
            .colors
            .insert("color_text_inherit".to_string(), "inherit".to_string());

        let out = render("colors.xml", &tokens).unwrap();
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n"));
        assert!(out.contains("    <color name=\"color_brand_primary_primary\">#1A73E8</color>\n"));
        assert!(out.contains("    <color name=\"color_overlay_fade\">#1A1A1A95</color>\n"));
        assert!(!out.contains("inherit"));
        assert!(out.ends_with("</resources>\n"));
    }

    #[test]
    fn test_dimens_with_border_widths() {
        let mut tokens = ExtractedTokens::default();
        tokens.spacing.insert("spacing-4".to_string(), LiteralValue::from(4));
        tokens.spacing.insert("2xl".to_string(), LiteralValue::from(48));
        tokens.border_width.insert("thin".to_string(), LiteralValue::from("1px"));

        let out = render("dimens.xml", &tokens).unwrap();
        assert!(out.contains("    <!-- 4 (variants: spacing, compact, spacious) -->\n"));
        assert!(out.contains("    <dimen name=\"spacing_4\">4dp</dimen>\n"));
        assert!(out.contains("    <dimen name=\"spacing_2xl\">48dp</dimen>\n"));
        assert!(out.contains("    <!-- BORDER WIDTH TOKENS -->\n"));
        assert!(out.contains("    <dimen name=\"border_thin\">1px</dimen>\n"));
    }

    #[test]
    fn test_typography_document() {
        let mut tokens = ExtractedTokens::default();
        tokens.typography.font_size.insert("100".to_string(), LiteralValue::from(14));
        tokens.typography.font_weight.insert("semi_bold".to_string(), LiteralValue::from(600));
        tokens.typography.compositions.insert(
            "headingLarge".to_string(),
            TextStyle {
                font_family: Some(FontBucket::Serif),
                letter_spacing: Some(LiteralValue::from("-0.5")),
                properties: BTreeMap::new(),
            },
        );
        tokens.text_case.insert("upper".to_string(), LiteralValue::from("uppercase"));

        let out = render("typography.xml", &tokens).unwrap();
        assert!(out.contains("<string name=\"typography_heading_large_font_family\">serif</string>"));
        assert!(out.contains("<string name=\"typography_heading_large_letter_spacing\">-0.5</string>"));
        assert!(out.contains("<dimen name=\"font_size_100\">14sp</dimen>"));
        assert!(out.contains("<integer name=\"font_weight_semi_bold\">600</integer>"));
        assert!(out.contains("<string name=\"text_case_upper\">uppercase</string>"));
        assert!(!out.contains("LINE HEIGHTS"));
    }

    #[test]
    fn test_accessibility_groups_are_exclusive() {
        let mut tokens = ExtractedTokens::default();
        tokens
            .accessibility
            .insert("wcag-aa-text-on-primary".to_string(), "#FFFFFF".to_string());
        tokens
            .accessibility
            .insert("focus-ring-contrast".to_string(), "#005FCC".to_string());
        tokens
            .accessibility
            .insert("min-touch-target".to_string(), "48dp".to_string());

        let out = render("attrs.xml", &tokens).unwrap();
        assert!(out.contains("<color name=\"accessibility_text_on_primary\">#FFFFFF</color>"));
        assert_eq!(out.matches("accessibility_focus_ring_contrast").count(), 1);
        assert!(out.contains("<string name=\"accessibility_min_touch_target\">48dp</string>"));
        assert!(!out.contains("High Contrast Mode"));
    }

    #[test]
    fn test_animations_and_elevation() {
        let mut tokens = ExtractedTokens::default();
        tokens.motion.durations.insert("fast".to_string(), LiteralValue::from("150ms"));
        tokens.motion.transitions.insert(
            "fade".to_string(),
            LiteralValue::from("opacity 150ms cubic-bezier(0.4, 0, 0.2, 1)"),
        );
        tokens.elevation.insert(
            "1".to_string(),
            LiteralValue::from_json(serde_json::json!({"y": "2px", "blur": 4})).unwrap(),
        );

        let animations = render("animations.xml", &tokens).unwrap();
        assert!(animations.contains("<integer name=\"motion_duration_fast\">150</integer>"));
        assert!(animations.contains(
            "<string name=\"motion_transition_fade\">opacity 150ms cubic-bezier(0.4, 0, 0.2, 1)</string>"
        ));

        let elevation = render("elevation.xml", &tokens).unwrap();
        assert!(elevation.contains("<dimen name=\"elevation_1\">2dp</dimen>"));
    }

    #[test]
    fn test_components_replace_serialized_values_with_identifiers() {
        let mut tokens = ExtractedTokens::default();
        tokens.components.insert(
            "button".to_string(),
            vec![
                VariantProperty {
                    path: vec!["primary".to_string(), "background".to_string()],
                    value: PropertyValue::Color("#1A73E8".to_string()),
                },
                VariantProperty {
                    path: vec!["primary".to_string(), "padding".to_string()],
                    value: PropertyValue::Number(serde_json::Number::from(12i64)),
                },
                VariantProperty {
                    path: vec!["primary".to_string(), "style".to_string()],
                    value: PropertyValue::Opaque("{'fill': broken".to_string()),
                },
                VariantProperty {
                    path: vec!["primary".to_string(), "label".to_string()],
                    value: PropertyValue::Text("Save & exit".to_string()),
                },
            ],
        );

        let out = render("components.xml", &tokens).unwrap();
        assert!(out.contains("    <!-- Button Component -->\n"));
        assert!(out.contains("<color name=\"component_button_primary_background\">#1A73E8</color>"));
        assert!(out.contains("<dimen name=\"component_button_primary_padding\">12dp</dimen>"));
        assert!(out.contains(
            "<string name=\"component_button_primary_style\">button_primary_style</string>"
        ));
        assert!(out.contains("<string name=\"component_button_primary_label\">Save &amp; exit</string>"));
    }

    #[test]
    fn test_optional_documents() {
        let tokens = ExtractedTokens::default();
        assert!(render("layout.xml", &tokens).is_none());
        assert!(render("assets.xml", &tokens).is_none());

        let mut tokens = ExtractedTokens::default();
        let mut android = FlatTokens::new();
        android.insert("minSdk".to_string(), LiteralValue::from(26));
        tokens.platforms.insert("android".to_string(), android);

        let out = render("platforms.xml", &tokens).unwrap();
        assert!(out.contains("    <!-- ANDROID Platform -->\n"));
        assert!(out.contains("<string name=\"platform_android_min_sdk\">26</string>"));
    }
}
