//! Identifier case conversion.
//!
//! Token keys arrive in every style (`brandPrimary`, `font-weight-bold`,
//! `spacing_md`, `2xl`). These helpers split them into words and rejoin
//! them for the target language. Non-ASCII text is transliterated first, so
//! output is always plain ASCII.

use deunicode::deunicode;

/// Splits `name` into lowercase words.
///
/// Word boundaries are any non-alphanumeric character, a lowercase letter or
/// digit followed by an uppercase letter, and the last capital of an acronym
/// that is followed by a lowercase letter (`XMLParser` → `xml`, `parser`).
pub fn split_words(name: &str) -> Vec<String> {
    let ascii = deunicode(name);
    let chars: Vec<char> = ascii.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let hump = prev.is_ascii_lowercase() || prev.is_ascii_digit();
            let acronym_end = prev.is_ascii_uppercase() && next_is_lower;
            if hump || acronym_end {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c.to_ascii_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn guard_leading_digit(ident: String) -> String {
    match ident.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{}", ident),
        Some(_) => ident,
        None => "_".to_string(),
    }
}

/// `color_brandPrimary` → `colorBrandPrimary`; a leading digit gets `_`.
pub fn to_camel_case(name: &str) -> String {
    let words = split_words(name);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    guard_leading_digit(out)
}

/// `luxury_night` → `LuxuryNight`; a leading digit gets `_`.
pub fn to_pascal_case(name: &str) -> String {
    let out: String = split_words(name).iter().map(|w| capitalize(w)).collect();
    guard_leading_digit(out)
}

/// `brandPrimary-hover` → `brand_primary_hover`.
pub fn to_snake_case(name: &str) -> String {
    split_words(name).join("_")
}

/// `brandPrimary_hover` → `brand-primary-hover`.
pub fn to_kebab_case(name: &str) -> String {
    split_words(name).join("-")
}
