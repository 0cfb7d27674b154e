//! Literal token values.
//!
//! [`LiteralValue`] is the closed set of shapes a token's `value` can take
//! once parsed: strings, numbers, booleans, lists and nested objects. Number
//! identity (integer vs float) is preserved so textual output reads the way
//! the source was written (`4`, not `4.0`).

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Number, Value};

/// A parsed token value.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Str(String),
    Num(Number),
    Bool(bool),
    List(Vec<LiteralValue>),
    Object(BTreeMap<String, LiteralValue>),
}

impl LiteralValue {
    /// Converts a JSON value, dropping `null` wherever it appears.
    ///
    /// Returns `None` only when `value` itself is `null`.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(LiteralValue::Str(s)),
            Value::Number(n) => Some(LiteralValue::Num(n)),
            Value::Bool(b) => Some(LiteralValue::Bool(b)),
            Value::Array(items) => Some(LiteralValue::List(
                items.into_iter().filter_map(LiteralValue::from_json).collect(),
            )),
            Value::Object(map) => Some(LiteralValue::Object(
                map.into_iter()
                    .filter_map(|(k, v)| LiteralValue::from_json(v).map(|v| (k, v)))
                    .collect(),
            )),
        }
    }

    /// Converts back into a JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            LiteralValue::Str(s) => Value::String(s.clone()),
            LiteralValue::Num(n) => Value::Number(n.clone()),
            LiteralValue::Bool(b) => Value::Bool(*b),
            LiteralValue::List(items) => Value::Array(items.iter().map(|v| v.to_json()).collect()),
            LiteralValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Builds a number from an `f64`, keeping whole values integral.
    ///
    /// Non-finite input has no JSON representation and yields `None`.
    pub fn from_f64(n: f64) -> Option<Self> {
        if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
            return Some(LiteralValue::Num(Number::from(n as i64)));
        }
        Number::from_f64(n).map(LiteralValue::Num)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, LiteralValue>> {
        match self {
            LiteralValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Numeric reading of the value.
    ///
    /// Numbers convert directly; strings are accepted when they hold a plain
    /// decimal number (`"12"`, `"0.5"`, `"-1"`).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LiteralValue::Num(n) => n.as_f64(),
            LiteralValue::Str(s) => parse_plain_number(s),
            _ => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, LiteralValue::List(_) | LiteralValue::Object(_))
    }
}

/// The textual form substituted for a placeholder.
///
/// Strings are written verbatim, numbers as written in the source, booleans
/// as `true`/`false`, lists and objects as compact JSON.
impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Str(s) => f.write_str(s),
            LiteralValue::Num(n) => write!(f, "{}", n),
            LiteralValue::Bool(b) => write!(f, "{}", b),
            LiteralValue::List(_) | LiteralValue::Object(_) => {
                write!(f, "{}", self.to_json())
            }
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(s: &str) -> Self {
        LiteralValue::Str(s.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(s: String) -> Self {
        LiteralValue::Str(s)
    }
}

impl From<i64> for LiteralValue {
    fn from(n: i64) -> Self {
        LiteralValue::Num(Number::from(n))
    }
}

impl From<bool> for LiteralValue {
    fn from(b: bool) -> Self {
        LiteralValue::Bool(b)
    }
}

/// Parses strings made only of an optional sign, digits and at most one dot.
pub(crate) fn parse_plain_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if digits.is_empty() || digits.matches('.').count() > 1 {
        return None;
    }
    if !digits.chars().all(|c| c.is_ascii_digit() || c == '.') || digits == "." {
        return None;
    }
    trimmed.parse().ok()
}
