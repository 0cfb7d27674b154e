//! Motion extraction: durations, easing curves and transitions.

use super::flat::{flatten_group, FlatTokens, Leaves};
use crate::resolve::{has_placeholder, ResolutionSession};
use crate::store::TokenGroup;
use crate::value::LiteralValue;

const DEFAULT_DURATIONS: [(&str, i64); 3] = [("short", 100), ("standard", 300), ("slow", 500)];

const DEFAULT_EASING: [(&str, &str); 3] = [
    ("default", "cubic-bezier(0.25, 0.46, 0.45, 0.94)"),
    ("entrance", "cubic-bezier(0.34, 1.56, 0.64, 1)"),
    ("exit", "cubic-bezier(0.66, 0, 0.66, 0.07)"),
];

/// Values substituted into transitions whose motion references are missing.
const TRANSITION_FALLBACKS: [(&str, &str); 7] = [
    ("{motion.duration.fast}", "150ms"),
    ("{motion.duration.standard}", "300ms"),
    ("{motion.duration.slow}", "500ms"),
    ("{motion.easing.smooth}", "cubic-bezier(0.4, 0, 0.2, 1)"),
    ("{motion.easing.default}", "cubic-bezier(0.25, 0.46, 0.45, 0.94)"),
    ("{motion.easing.entrance}", "cubic-bezier(0.34, 1.56, 0.64, 1)"),
    ("{motion.easing.exit}", "cubic-bezier(0.66, 0, 0.66, 0.07)"),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Motion {
    pub durations: FlatTokens,
    pub easing: FlatTokens,
    pub transitions: FlatTokens,
}

impl Motion {
    pub fn len(&self) -> usize {
        self.durations.len() + self.easing.len() + self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn extract_motion(session: &mut ResolutionSession<'_>) -> Motion {
    let motion = session.store().group("motion");

    let durations = match subgroup(motion, "duration") {
        Some(group) => flatten_group(session, group, Leaves::TokensOnly),
        None => {
            tracing::debug!("no motion durations in source, using defaults");
            DEFAULT_DURATIONS
                .iter()
                .map(|(name, ms)| (name.to_string(), LiteralValue::from(*ms)))
                .collect()
        }
    };

    let easing = match subgroup(motion, "easing") {
        Some(group) => flatten_group(session, group, Leaves::TokensOnly),
        None => {
            tracing::debug!("no easing curves in source, using defaults");
            DEFAULT_EASING
                .iter()
                .map(|(name, curve)| (name.to_string(), LiteralValue::from(*curve)))
                .collect()
        }
    };

    let transitions = match subgroup(motion, "transition") {
        Some(group) => extract_transitions(session, group),
        None => FlatTokens::new(),
    };

    Motion {
        durations,
        easing,
        transitions,
    }
}

fn subgroup<'a>(motion: Option<&'a TokenGroup>, key: &str) -> Option<&'a TokenGroup> {
    motion?.get(key)?.as_group()
}

fn extract_transitions(session: &mut ResolutionSession<'_>, group: &TokenGroup) -> FlatTokens {
    flatten_group(session, group, Leaves::TokensOnly)
        .into_iter()
        .map(|(name, value)| match value {
            LiteralValue::Str(s) if has_placeholder(&s) => {
                (name, LiteralValue::Str(apply_transition_fallbacks(&s)))
            }
            other => (name, other),
        })
        .collect()
}

/// Replaces well-known motion placeholders left in a transition.
pub fn apply_transition_fallbacks(transition: &str) -> String {
    TRANSITION_FALLBACKS
        .iter()
        .fold(transition.to_string(), |acc, (placeholder, value)| {
            acc.replace(placeholder, value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TokenStore;
    use serde_json::{json, Value};

    fn store(value: Value) -> TokenStore {
        TokenStore::from_mapping(value.as_object().unwrap().clone())
    }

    #[test]
    fn test_defaults_when_motion_is_absent() {
        let store = TokenStore::new();
        let mut session = ResolutionSession::new(&store);
        let motion = extract_motion(&mut session);

        assert_eq!(motion.durations["standard"], LiteralValue::from(300));
        assert_eq!(
            motion.easing["exit"],
            LiteralValue::from("cubic-bezier(0.66, 0, 0.66, 0.07)")
        );
        assert!(motion.transitions.is_empty());
    }

    #[test]
    fn test_transition_resolves_against_motion_tokens() {
        let store = store(json!({
            "motion": {
                "duration": {"fast": {"value": "150ms"}},
                "easing": {"smooth": {"value": "ease-in-out"}},
                "transition": {"fade": {"value": "opacity {motion.duration.fast} {motion.easing.smooth}"}},
            },
        }));
        let mut session = ResolutionSession::new(&store);
        let motion = extract_motion(&mut session);

        assert_eq!(motion.transitions["fade"], LiteralValue::from("opacity 150ms ease-in-out"));
        assert_eq!(motion.durations.len(), 1);
    }

    #[test]
    fn test_transition_falls_back_for_missing_references() {
        let store = store(json!({
            "motion": {
                "transition": {
                    "slide": {"value": "transform {motion.duration.slow} {motion.easing.exit}"},
                    "custom": {"value": "all {motion.duration.glacial}"},
                },
            },
        }));
        let mut session = ResolutionSession::new(&store);
        let motion = extract_motion(&mut session);

        assert_eq!(
            motion.transitions["slide"],
            LiteralValue::from("transform 500ms cubic-bezier(0.66, 0, 0.66, 0.07)")
        );
        assert_eq!(
            motion.transitions["custom"],
            LiteralValue::from("all {motion.duration.glacial}")
        );
        assert!(session.unresolved().contains("motion.duration.slow"));
    }
}
