//! Value formatting shared by the emitters.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::case::{split_words, to_snake_case};
use crate::value::LiteralValue;

static HEX_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9A-Fa-f]{6,8}").expect("hex run pattern is valid"));
static HASH_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([0-9A-Fa-f]{6,8})").expect("hash color pattern is valid"));
static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(-?\d+(?:\.\d+)?)").expect("number pattern is valid"));

const OPAQUE_BLACK: &str = "FF000000";

/// Converts a color string to the 8-digit ARGB hex used by `Color(0x...)`.
///
/// `#RRGGBB` gains an opaque `FF` alpha, `#AARRGGBB` is kept. Anything else
/// uses the first run of 6 to 8 hex digits in the string (a 7-digit run is
/// cut to 6), and falls back to opaque black.
pub fn android_argb(value: &str) -> String {
    let clean = value.trim().trim_start_matches('#');
    let all_hex = clean.chars().all(|c| c.is_ascii_hexdigit());
    if all_hex && clean.len() == 6 {
        return format!("FF{}", clean.to_uppercase());
    }
    if all_hex && clean.len() == 8 {
        return clean.to_uppercase();
    }

    match HEX_RUN.find(clean) {
        Some(run) if run.as_str().len() == 8 => run.as_str().to_uppercase(),
        Some(run) => format!("FF{}", run.as_str()[..6].to_uppercase()),
        None => OPAQUE_BLACK.to_string(),
    }
}

/// First `#`-prefixed hex color inside `value`, e.g. a gradient stop.
pub fn first_hex_color(value: &str) -> Option<String> {
    HASH_COLOR
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("#{}", m.as_str()))
}

pub fn is_gradient(value: &str) -> bool {
    value.to_lowercase().contains("gradient")
}

/// The value usable as an Android `<color>` resource, if any.
///
/// Gradients degrade to their first hex stop; other non-`#` values have no
/// color form.
pub fn resource_color(value: &str) -> Option<String> {
    if is_gradient(value) {
        first_hex_color(value)
    } else if value.starts_with('#') {
        Some(value.to_string())
    } else {
        None
    }
}

/// Numeric prefix of a value's textual form (`"150ms"` → `"150"`).
pub fn leading_number(value: &LiteralValue) -> Option<String> {
    let text = value.to_string();
    LEADING_NUMBER
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Appends `unit` to unitless numbers; values that already carry a unit (or
/// are not numeric) are written as they are.
pub fn with_unit(value: &LiteralValue, unit: &str) -> String {
    match value.as_f64() {
        Some(_) => format!("{}{}", value.to_string().trim(), unit),
        None => value.to_string(),
    }
}

/// `0x`-free integer form of a dimension for Kotlin `.dp`/`.sp` literals.
pub fn kotlin_number(value: &LiteralValue) -> String {
    leading_number(value).unwrap_or_else(|| "0".to_string())
}

/// Formats a float the way a token author would write it (`4`, `0.5`).
pub fn trim_float(n: f64) -> String {
    match LiteralValue::from_f64(n) {
        Some(value) => value.to_string(),
        None => "0".to_string(),
    }
}

/// Quotes a Kotlin string literal.
pub fn kotlin_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// An Android resource name: snake case, and never starting with a digit
/// (`prefix_` is prepended when it would).
pub fn resource_name(prefix: &str, name: &str) -> String {
    let snake = to_snake_case(name);
    match snake.chars().next() {
        Some(c) if !c.is_ascii_digit() => snake,
        _ => format!("{}_{}", prefix, snake),
    }
}

/// A member name made of a fixed prefix and the capitalized words of `name`
/// (`fontSize` + `100` → `fontSize100`).
pub fn prefixed_member(prefix: &str, name: &str) -> String {
    let mut out = prefix.to_string();
    for word in split_words(name) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Trailing numeric segment of a name split on `-`/`_` (`compact-16` → 16).
pub fn numeric_suffix(name: &str) -> Option<u64> {
    name.rsplit(['-', '_']).next()?.parse().ok()
}

/// Orders names by numeric suffix first, then alphabetically; names without
/// a numeric suffix go last.
pub fn by_numeric_suffix(a: &str, b: &str) -> Ordering {
    let key = |name: &str| (numeric_suffix(name).unwrap_or(u64::MAX), name.to_string());
    key(a).cmp(&key(b))
}

/// Orders purely numeric names by value and puts everything else after them.
pub fn by_numeric_name(a: &str, b: &str) -> Ordering {
    let key = |name: &str| (name.parse::<u64>().unwrap_or(u64::MAX), name.to_string());
    key(a).cmp(&key(b))
}

/// First letter uppercased, the rest untouched.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_android_argb() {
        assert_eq!(android_argb("#1a73e8"), "FF1A73E8");
        assert_eq!(android_argb("#801a73e8"), "801A73E8");
        assert_eq!(android_argb("rgba #00ff00 50%"), "FF00FF00");
        assert_eq!(android_argb("linear-gradient(#1A1A1A95 0%, #000 100%)"), "1A1A1A95");
        assert_eq!(android_argb("#abcdef1"), "FFABCDEF");
        assert_eq!(android_argb("transparent"), "FF000000");
        assert_eq!(android_argb("{color.missing}"), "FF000000");
    }

    #[test]
    fn test_resource_color() {
        assert_eq!(resource_color("#FFF000"), Some("#FFF000".to_string()));
        assert_eq!(
            resource_color("linear-gradient(180deg, #1A1A1A95 0%, #000000 100%)"),
            Some("#1A1A1A95".to_string())
        );
        assert_eq!(resource_color("linear-gradient(red, blue)"), None);
        assert_eq!(resource_color("rgb(0,0,0)"), None);
    }

    #[test]
    fn test_units() {
        assert_eq!(with_unit(&LiteralValue::from(4), "dp"), "4dp");
        assert_eq!(with_unit(&LiteralValue::from("8"), "dp"), "8dp");
        assert_eq!(with_unit(&LiteralValue::from("1px"), "dp"), "1px");
        assert_eq!(kotlin_number(&LiteralValue::from("150ms")), "150");
        assert_eq!(kotlin_number(&LiteralValue::from("auto")), "0");
        assert_eq!(leading_number(&LiteralValue::from("-0.5em")), Some("-0.5".to_string()));
        assert_eq!(trim_float(2.0), "2");
        assert_eq!(trim_float(1.5), "1.5");
    }

    #[test]
    fn test_kotlin_string_escapes() {
        assert_eq!(kotlin_string(r#"say "hi" for $5"#), r#""say \"hi\" for \$5""#);
    }

    #[test]
    fn test_resource_name() {
        assert_eq!(resource_name("spacing", "compact-16"), "compact_16");
        assert_eq!(resource_name("spacing", "2xl"), "spacing_2xl");
        assert_eq!(resource_name("asset", "brandLogo"), "brand_logo");
    }

    #[test]
    fn test_prefixed_member() {
        assert_eq!(prefixed_member("fontSize", "100"), "fontSize100");
        assert_eq!(prefixed_member("duration", "extra-slow"), "durationExtraSlow");
    }

    #[test]
    fn test_sorting() {
        let mut names = vec!["spacious-8", "spacing-16", "compact-8", "gutter"];
        names.sort_by(|a, b| by_numeric_suffix(a, b));
        assert_eq!(names, vec!["compact-8", "spacious-8", "spacing-16", "gutter"]);

        let mut levels = vec!["10", "2", "hero", "1"];
        levels.sort_by(|a, b| by_numeric_name(a, b));
        assert_eq!(levels, vec!["1", "2", "10", "hero"]);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hover"), "Hover");
        assert_eq!(capitalize(""), "");
    }
}
