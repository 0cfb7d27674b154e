//! Kotlin object modules, one per category.
//!
//! Every module is a single `object` with `val` members, rendered through the
//! `kotlin_object.kt` template. Member names are camelCase; names that would
//! start with a digit get a category prefix (`spacing2xl`, `radius4`) or an
//! underscore for elevation levels (`_1`).

use serde::Serialize;

use super::engine::{TemplateEngine, KOTLIN_OBJECT, TOKEN_PROVIDER};
use super::format::{
    android_argb, by_numeric_name, by_numeric_suffix, capitalize, kotlin_number, kotlin_string,
    leading_number, numeric_suffix, prefixed_member, trim_float,
};
use super::Artifact;
use crate::case::{to_camel_case, to_pascal_case};
use crate::error::EmitError;
use crate::extract::{
    shadow_dimension, AccessibilityTokens, ColorTable, ExtractedTokens, FlatTokens, Motion,
    PropertyValue, Typography, VariantTree,
};
use crate::mode::Mode;
use crate::value::LiteralValue;

const COLOR_IMPORT: &str = "androidx.compose.ui.graphics.Color";
const DP_IMPORT: &str = "androidx.compose.ui.unit.dp";
const SP_IMPORT: &str = "androidx.compose.ui.unit.sp";

/// Objects that [`token_provider`] maps per brand and theme.
pub const PROVIDED_OBJECTS: [&str; 8] = [
    "ColorTokens",
    "SpacingTokens",
    "TypographyTokens",
    "BorderRadiusTokens",
    "ElevationTokens",
    "MotionTokens",
    "AccessibilityTokens",
    "InteractionTokens",
];

/// Files written by [`emit_kotlin`] into a single-mode output directory.
pub const KOTLIN_FILES: [&str; 9] = [
    "Color.kt",
    "Spacing.kt",
    "Typography.kt",
    "BorderRadius.kt",
    "Elevation.kt",
    "Motion.kt",
    "Accessibility.kt",
    "Interactions.kt",
    "Assets.kt",
];

const ELEVATION_FALLBACK: [(&str, &str); 5] =
    [("_0", "0.dp"), ("_1", "2.dp"), ("_2", "4.dp"), ("_3", "8.dp"), ("_4", "16.dp")];

#[derive(Debug, Serialize)]
struct KotlinObject {
    package: String,
    imports: Vec<&'static str>,
    name: &'static str,
    sections: Vec<Section>,
}

#[derive(Debug, Default, Serialize)]
struct Section {
    comment: Option<String>,
    object: Option<String>,
    entries: Vec<Entry>,
}

impl Section {
    fn commented(comment: impl Into<String>) -> Self {
        Section {
            comment: Some(comment.into()),
            ..Section::default()
        }
    }

    fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push(Entry {
            name: name.into(),
            value: value.into(),
        });
    }
}

#[derive(Debug, Serialize)]
struct Entry {
    name: String,
    value: String,
}

/// camelCase member name, with `prefix` in front when the name starts with a
/// digit.
fn member_name(prefix: &str, name: &str) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        prefixed_member(prefix, name)
    } else {
        to_camel_case(name)
    }
}

/// Renders every Kotlin module for one mode.
///
/// `package` is the full package, mode suffix included.
pub fn emit_kotlin(
    engine: &TemplateEngine,
    package: &str,
    tokens: &ExtractedTokens,
) -> Result<Vec<Artifact>, EmitError> {
    let mut objects = vec![
        ("Color.kt", colors(package, &tokens.colors)),
        ("Spacing.kt", spacing(package, &tokens.spacing)),
        ("Typography.kt", typography(package, &tokens.typography)),
        ("BorderRadius.kt", radius(package, &tokens.radius)),
        ("Elevation.kt", elevation(package, &tokens.elevation)),
        ("Motion.kt", motion(package, &tokens.motion)),
        ("Accessibility.kt", accessibility(package, &tokens.accessibility)),
        ("Interactions.kt", interactions(package, &tokens.interactions)),
    ];
    if !tokens.assets.is_empty() {
        objects.push(("Assets.kt", assets(package, &tokens.assets)));
    }

    objects
        .into_iter()
        .map(|(file_name, object)| {
            Ok(Artifact::kotlin(file_name, engine.render(KOTLIN_OBJECT, &object)?))
        })
        .collect()
}

fn colors(package: &str, colors: &ColorTable) -> KotlinObject {
    let mut section = Section::default();
    for (name, value) in colors {
        section.push(to_camel_case(name), format!("Color(0x{})", android_argb(value)));
    }
    KotlinObject {
        package: package.to_string(),
        imports: vec![COLOR_IMPORT],
        name: "ColorTokens",
        sections: vec![section],
    }
}

fn spacing(package: &str, spacing: &FlatTokens) -> KotlinObject {
    let mut names: Vec<&String> = spacing.keys().collect();
    names.sort_by(|a, b| by_numeric_suffix(a, b));

    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<Option<u64>> = None;
    for name in names {
        let suffix = numeric_suffix(name);
        if current != Some(suffix) {
            let label = name.rsplit(['-', '_']).next().unwrap_or(name.as_str());
            sections.push(Section::commented(format!(
                "{} (variants: spacing, compact, spacious)",
                label
            )));
            current = Some(suffix);
        }
        if let Some(section) = sections.last_mut() {
            section.push(
                member_name("spacing", name),
                format!("{}.dp", kotlin_number(&spacing[name])),
            );
        }
    }

    KotlinObject {
        package: package.to_string(),
        imports: vec![DP_IMPORT],
        name: "SpacingTokens",
        sections,
    }
}

fn numbered_section(
    tokens: &FlatTokens,
    comment: &str,
    prefix: &str,
    placeholder: (usize, &str),
) -> Section {
    if tokens.is_empty() {
        let (count, value) = placeholder;
        let mut section = Section::commented(format!("{} - Placeholder", comment));
        for i in 0..count {
            section.push(format!("{}{}", prefix, i), format!("{}.sp", value));
        }
        return section;
    }

    let mut names: Vec<&String> = tokens.keys().collect();
    names.sort_by(|a, b| by_numeric_name(a, b));
    let mut section = Section::commented(comment);
    for name in names {
        section.push(
            prefixed_member(prefix, name),
            format!("{}.sp", kotlin_number(&tokens[name])),
        );
    }
    section
}

fn typography(package: &str, typography: &Typography) -> KotlinObject {
    let mut weights = Section::commented("Font Weights");
    for (name, value) in &typography.font_weight {
        weights.push(prefixed_member("fontWeight", name), kotlin_number(value));
    }

    KotlinObject {
        package: package.to_string(),
        imports: vec![SP_IMPORT],
        name: "TypographyTokens",
        sections: vec![
            numbered_section(&typography.font_size, "Font Sizes (sp)", "fontSize", (11, "12")),
            numbered_section(&typography.line_height, "Line Heights (sp)", "lineHeight", (5, "20")),
            weights,
        ],
    }
}

fn radius(package: &str, radius: &FlatTokens) -> KotlinObject {
    let mut section = Section::commented("Border radius values for rounded corners");
    for (name, value) in radius {
        section.push(member_name("radius", name), format!("{}.dp", kotlin_number(value)));
    }
    KotlinObject {
        package: package.to_string(),
        imports: vec![DP_IMPORT],
        name: "BorderRadiusTokens",
        sections: vec![section],
    }
}

fn elevation(package: &str, elevation: &FlatTokens) -> KotlinObject {
    let mut section = Section::commented("Elevation levels (blur values from shadow)");
    if elevation.is_empty() {
        for (name, value) in ELEVATION_FALLBACK {
            section.push(name, value);
        }
    } else {
        let mut names: Vec<&String> = elevation.keys().collect();
        names.sort_by(|a, b| by_numeric_name(a, b));
        for name in names {
            let blur = shadow_dimension(&elevation[name], "blur").unwrap_or(0.0);
            section.push(to_camel_case(name), format!("{}.dp", trim_float(blur)));
        }
    }
    KotlinObject {
        package: package.to_string(),
        imports: vec![DP_IMPORT],
        name: "ElevationTokens",
        sections: vec![section],
    }
}

fn motion(package: &str, motion: &Motion) -> KotlinObject {
    let mut durations = Section::commented("Durations (milliseconds)");
    for (name, value) in &motion.durations {
        let literal = leading_number(value).unwrap_or_else(|| kotlin_string(&value.to_string()));
        durations.push(prefixed_member("duration", name), literal);
    }

    let mut easing = Section::commented("Easing Functions");
    for (name, value) in &motion.easing {
        easing.push(prefixed_member("easing", name), kotlin_string(&value.to_string()));
    }

    let mut sections = vec![durations, easing];
    if !motion.transitions.is_empty() {
        let mut transitions = Section::commented("Transitions (combined duration + easing)");
        for (name, value) in &motion.transitions {
            transitions.push(prefixed_member("transition", name), kotlin_string(&value.to_string()));
        }
        sections.push(transitions);
    }

    KotlinObject {
        package: package.to_string(),
        imports: Vec::new(),
        name: "MotionTokens",
        sections,
    }
}

fn accessibility(package: &str, accessibility: &AccessibilityTokens) -> KotlinObject {
    let mut section = Section::default();
    for (name, value) in accessibility {
        let literal = if value.starts_with('#') {
            format!("Color(0x{})", android_argb(value))
        } else {
            kotlin_string(value)
        };
        section.push(to_camel_case(name), literal);
    }
    KotlinObject {
        package: package.to_string(),
        imports: vec![COLOR_IMPORT],
        name: "AccessibilityTokens",
        sections: vec![section],
    }
}

fn property_literal(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Color(color) => format!("Color(0x{})", android_argb(color)),
        PropertyValue::Number(n) => n.to_string(),
        PropertyValue::Text(text) | PropertyValue::Unresolved(text) | PropertyValue::Opaque(text) => {
            kotlin_string(text)
        }
        PropertyValue::Composite(fields) => {
            kotlin_string(&LiteralValue::Object(fields.clone()).to_string())
        }
    }
}

fn interactions(package: &str, interactions: &VariantTree) -> KotlinObject {
    let sections = interactions
        .iter()
        .map(|(state, properties)| {
            let mut section = Section::commented(format!("{} State", capitalize(state)));
            section.object = Some(to_pascal_case(state));
            for property in properties {
                section.push(
                    to_camel_case(&property.path.join("_")),
                    property_literal(&property.value),
                );
            }
            section
        })
        .collect();

    KotlinObject {
        package: package.to_string(),
        imports: vec![COLOR_IMPORT],
        name: "InteractionTokens",
        sections,
    }
}

fn assets(package: &str, assets: &FlatTokens) -> KotlinObject {
    let mut section = Section::default();
    for (name, value) in assets {
        section.push(member_name("asset", name), kotlin_string(&value.to_string()));
    }
    KotlinObject {
        package: package.to_string(),
        imports: Vec::new(),
        name: "AssetTokens",
        sections: vec![section],
    }
}

#[derive(Debug, Serialize)]
struct ProviderMode {
    suffix: String,
    alias: String,
}

#[derive(Debug, Serialize)]
struct ProviderBrand {
    brand: String,
    light: String,
    dark: String,
}

#[derive(Debug, Serialize)]
struct TokenProviderView<'a> {
    package: &'a str,
    modes: Vec<ProviderMode>,
    objects: &'a [&'a str],
    brands: Vec<ProviderBrand>,
    fallback: ProviderBrand,
}

fn provider_brand(brand: &str, light_theme: &str, dark_theme: &str) -> ProviderBrand {
    let alias = |theme: &str| to_pascal_case(&Mode::new(brand, theme).suffix());
    ProviderBrand {
        brand: brand.to_string(),
        light: alias(light_theme),
        dark: alias(dark_theme),
    }
}

/// Renders `TokenProvider.kt`, which picks the per-mode objects for a brand
/// name and a dark-theme flag.
///
/// Every brand maps light to `light_theme` and dark to `dark_theme`; unknown
/// brands use `default_brand`.
pub fn token_provider(
    engine: &TemplateEngine,
    package: &str,
    modes: &[Mode],
    default_brand: &str,
    light_theme: &str,
    dark_theme: &str,
) -> Result<Artifact, EmitError> {
    let mut brands: Vec<&str> = Vec::new();
    for mode in modes {
        if !brands.contains(&mode.brand.as_str()) {
            brands.push(&mode.brand);
        }
    }

    let view = TokenProviderView {
        package,
        modes: modes
            .iter()
            .map(|mode| {
                let suffix = mode.suffix();
                ProviderMode {
                    alias: to_pascal_case(&suffix),
                    suffix,
                }
            })
            .collect(),
        objects: &PROVIDED_OBJECTS,
        brands: brands
            .into_iter()
            .map(|brand| provider_brand(brand, light_theme, dark_theme))
            .collect(),
        fallback: provider_brand(default_brand, light_theme, dark_theme),
    };
    Ok(Artifact::kotlin(
        "TokenProvider.kt",
        engine.render(TOKEN_PROVIDER, &view)?,
    ))
}
