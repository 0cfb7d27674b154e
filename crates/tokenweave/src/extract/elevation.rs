//! Elevation extraction.
//!
//! Shadow shapes are passed through whole. Each output format reads the
//! sub-field it needs with [`shadow_dimension`].

use super::flat::FlatTokens;
use super::visible;
use crate::resolve::ResolutionSession;
use crate::value::{parse_plain_number, LiteralValue};

pub fn extract_elevation(session: &mut ResolutionSession<'_>) -> FlatTokens {
    let Some(levels) = session.store().group("elevation") else {
        return FlatTokens::new();
    };

    visible(levels)
        .filter_map(|(name, node)| {
            node.token_value()
                .map(|value| (name.clone(), session.resolve_fields(value)))
        })
        .collect()
}

/// Reads a numeric sub-field of a shadow, e.g. `blur` or `y`.
///
/// Strings such as `"4px"` lose their unit. A bare number stands for the
/// whole shadow and is returned for any field. Anything unreadable is
/// `None`.
pub fn shadow_dimension(shadow: &LiteralValue, field: &str) -> Option<f64> {
    match shadow {
        LiteralValue::Object(fields) => fields.get(field).and_then(strip_px),
        LiteralValue::Num(_) => shadow.as_f64(),
        _ => None,
    }
}

fn strip_px(value: &LiteralValue) -> Option<f64> {
    match value {
        LiteralValue::Num(n) => n.as_f64(),
        LiteralValue::Str(s) => {
            let trimmed = s.trim();
            let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
            parse_plain_number(number)
        }
        _ => None,
    }
}
