//! Typography extraction.
//!
//! Sizes and line heights are flat tables. Weights come from the
//! `Typography-Advanced` group (keys containing `font-weight`), with a
//! standard set when the source has none. Compositions are the named text
//! styles under `Typography`; their `fontFamily` is reduced to a platform
//! [`FontBucket`].

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::fallback::parse_serialized_object;
use super::flat::{extract_flat, FlatTokens};
use super::visible;
use crate::resolve::{has_placeholder, whole_reference, ResolutionSession};
use crate::value::{parse_plain_number, LiteralValue};

const FALLBACK_WEIGHTS: [(&str, i64); 5] = [
    ("light", 300),
    ("regular", 400),
    ("medium", 500),
    ("semibold", 600),
    ("bold", 700),
];

/// The two platform font families a composition can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontBucket {
    Serif,
    SansSerif,
}

impl FontBucket {
    /// Buckets a resolved family list by substring.
    pub fn classify(family: &str) -> Self {
        let lower = family.to_lowercase();
        if lower.contains("georgia") || (lower.contains("serif") && !lower.contains("sans-serif")) {
            FontBucket::Serif
        } else {
            FontBucket::SansSerif
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FontBucket::Serif => "serif",
            FontBucket::SansSerif => "sans-serif",
        }
    }
}

impl fmt::Display for FontBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named text style.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: Option<FontBucket>,
    pub letter_spacing: Option<LiteralValue>,
    /// Every other field, resolved where it was a string.
    pub properties: BTreeMap<String, LiteralValue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Typography {
    pub font_size: FlatTokens,
    pub line_height: FlatTokens,
    pub font_weight: FlatTokens,
    pub compositions: BTreeMap<String, TextStyle>,
}

impl Typography {
    pub fn len(&self) -> usize {
        self.font_size.len() + self.line_height.len() + self.font_weight.len() + self.compositions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn extract_typography(session: &mut ResolutionSession<'_>) -> Typography {
    let font_size = extract_flat(session, "fontSize");
    let line_height = extract_flat(session, "lineHeight");
    let mut font_weight = extract_weights(session);
    if font_weight.is_empty() {
        tracing::debug!("no font weights in source, using the standard set");
        font_weight = FALLBACK_WEIGHTS
            .iter()
            .map(|(name, weight)| (name.to_string(), LiteralValue::from(*weight)))
            .collect();
    }
    let compositions = extract_compositions(session);

    Typography {
        font_size,
        line_height,
        font_weight,
        compositions,
    }
}

fn extract_weights(session: &mut ResolutionSession<'_>) -> FlatTokens {
    let Some(advanced) = session.store().group("Typography-Advanced") else {
        return FlatTokens::new();
    };

    let mut weights = FlatTokens::new();
    for (name, node) in visible(advanced) {
        if !name.to_lowercase().contains("font-weight") {
            continue;
        }
        if let Some(value) = node.token_value() {
            let weight_name = name.replace("font-weight-", "").replace('-', "_");
            weights.insert(weight_name, session.resolve_value(value));
        }
    }
    weights
}

fn extract_compositions(session: &mut ResolutionSession<'_>) -> BTreeMap<String, TextStyle> {
    let Some(styles) = session.store().group("Typography") else {
        return BTreeMap::new();
    };

    let mut compositions = BTreeMap::new();
    for (name, node) in visible(styles) {
        let Some(value) = node.token_value() else {
            continue;
        };
        let fields = match value {
            LiteralValue::Object(fields) => fields.clone(),
            LiteralValue::Str(raw) => match parse_serialized_object(raw) {
                Some(fields) => fields,
                None => {
                    tracing::debug!(style = %name, "composition is not an object, skipping");
                    continue;
                }
            },
            _ => continue,
        };
        compositions.insert(name.clone(), build_style(session, fields));
    }
    compositions
}

fn build_style(
    session: &mut ResolutionSession<'_>,
    fields: BTreeMap<String, LiteralValue>,
) -> TextStyle {
    let mut style = TextStyle {
        font_family: None,
        letter_spacing: None,
        properties: BTreeMap::new(),
    };

    for (key, value) in fields {
        match key.as_str() {
            "fontFamily" => style.font_family = Some(bucket_family(session, &value)),
            "letterSpacing" => style.letter_spacing = Some(resolve_letter_spacing(session, value)),
            _ => {
                let resolved = session.resolve_value(&value);
                style.properties.insert(key, resolved);
            }
        }
    }
    style
}

fn bucket_family(session: &mut ResolutionSession<'_>, value: &LiteralValue) -> FontBucket {
    match value {
        LiteralValue::Str(raw) => {
            let resolved = session.resolve(raw);
            if has_placeholder(&resolved) {
                FontBucket::SansSerif
            } else {
                FontBucket::classify(&resolved)
            }
        }
        _ => FontBucket::SansSerif,
    }
}

fn resolve_letter_spacing(session: &mut ResolutionSession<'_>, value: LiteralValue) -> LiteralValue {
    let LiteralValue::Str(raw) = &value else {
        return value;
    };

    if let Some(path) = whole_reference(raw) {
        return match session.lookup(path) {
            Some(found) => coerce_number(found),
            None => value,
        };
    }
    coerce_number(value)
}

fn coerce_number(value: LiteralValue) -> LiteralValue {
    match &value {
        LiteralValue::Str(s) => parse_plain_number(s)
            .and_then(LiteralValue::from_f64)
            .unwrap_or(value),
        _ => value,
    }
}
