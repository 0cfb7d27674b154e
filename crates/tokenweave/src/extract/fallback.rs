//! Best-effort parsing of object values that arrive as strings.
//!
//! Some composition values are exported as a serialized object instead of a
//! real nested mapping: either JSON (`{"fill": "#fff"}`) or a single-quoted
//! notation (`{'fill': '#fff', 'bold': True}`). This is the only place that
//! tries to read them.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::value::LiteralValue;

/// Parses `raw` as a serialized object.
///
/// Accepts JSON objects and single-quoted object notation (with `True`,
/// `False` and `None` as bare words). Anything else, including JSON that is
/// not an object, yields `None`.
pub fn parse_serialized_object(raw: &str) -> Option<BTreeMap<String, LiteralValue>> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with('{') && trimmed.ends_with('}')) {
        return None;
    }

    let json = serde_json::from_str::<Value>(trimmed).ok().or_else(|| {
        let converted = single_quoted_to_json(trimmed)?;
        serde_json::from_str::<Value>(&converted).ok()
    })?;

    match LiteralValue::from_json(json)? {
        LiteralValue::Object(map) => Some(map),
        _ => None,
    }
}

/// Whether `raw` looks like a serialized object (as opposed to a plain
/// value or a `{dotted.path}` reference).
pub fn looks_serialized(raw: &str) -> bool {
    let trimmed = raw.trim();
    (trimmed.starts_with('{') || trimmed.starts_with('\'')) && trimmed.contains(':')
}

fn single_quoted_to_json(s: &str) -> Option<String> {
    let mut out = String::with_capacity(s.len());
    let mut word = String::new();
    let mut quote: Option<char> = None;
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == '\\' {
                    let escaped = chars.next()?;
                    if escaped == '\'' {
                        out.push('\'');
                    } else {
                        out.push('\\');
                        out.push(escaped);
                    }
                } else if c == q {
                    out.push('"');
                    quote = None;
                } else if c == '"' {
                    out.push_str("\\\"");
                } else {
                    out.push(c);
                }
            }
            None => {
                if c.is_ascii_alphabetic() {
                    word.push(c);
                    continue;
                }
                flush_word(&mut out, &mut word);
                if c == '\'' || c == '"' {
                    quote = Some(c);
                    out.push('"');
                } else {
                    out.push(c);
                }
            }
        }
    }

    if quote.is_some() {
        return None;
    }
    flush_word(&mut out, &mut word);
    Some(out)
}

fn flush_word(out: &mut String, word: &mut String) {
    match word.as_str() {
        "" => return,
        "True" => out.push_str("true"),
        "False" => out.push_str("false"),
        "None" => out.push_str("null"),
        other => out.push_str(other),
    }
    word.clear();
}
