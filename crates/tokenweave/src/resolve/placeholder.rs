//! Placeholder scanning.
//!
//! A placeholder is `{` + path + `}` where the path contains no braces.
//! There is no escaping and no nesting.

use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("placeholder pattern is valid"));

/// Distinct placeholder paths in `s`, in order of first appearance.
pub fn placeholder_paths(s: &str) -> Vec<&str> {
    let mut paths: Vec<&str> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(s) {
        if let Some(m) = caps.get(1) {
            let path = m.as_str();
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }
    paths
}

/// Returns true if `s` holds at least one placeholder.
pub fn has_placeholder(s: &str) -> bool {
    PLACEHOLDER.is_match(s)
}

/// If the whole string is exactly one placeholder, returns its path.
pub fn whole_reference(s: &str) -> Option<&str> {
    let inner = s.strip_prefix('{')?.strip_suffix('}')?;
    if inner.is_empty() || inner.contains('{') || inner.contains('}') {
        return None;
    }
    Some(inner)
}

/// Renders the placeholder text for `path`.
pub fn placeholder_for(path: &str) -> String {
    format!("{{{}}}", path)
}
