//! Asset extraction (`asset` / `assets` roots).
//!
//! Asset trees nest freely (`assets.icons.nav.home`), so every leaf is
//! collected under its path joined with `_` (`icons_nav_home`).

use super::flat::FlatTokens;
use super::visible;
use crate::resolve::ResolutionSession;
use crate::store::{TokenGroup, TokenNode};

const ROOTS: [&str; 2] = ["asset", "assets"];

pub fn extract_assets(session: &mut ResolutionSession<'_>) -> FlatTokens {
    let store = session.store();
    let mut assets = FlatTokens::new();
    for root in ROOTS {
        if let Some(group) = store.group(root) {
            walk(session, group, None, &mut assets);
        }
    }
    assets
}

fn walk(
    session: &mut ResolutionSession<'_>,
    group: &TokenGroup,
    prefix: Option<&str>,
    into: &mut FlatTokens,
) {
    for (key, node) in visible(group) {
        let name = match prefix {
            Some(prefix) => format!("{}_{}", prefix, key),
            None => key.clone(),
        };
        match node {
            TokenNode::Group(children) => walk(session, children, Some(&name), into),
            leaf => {
                if let Some(value) = leaf.leaf_value() {
                    into.insert(name, session.resolve_fields(value));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TokenStore;
    use crate::value::LiteralValue;
    use serde_json::json;

    #[test]
    fn test_nested_assets_are_flattened() {
        let store = TokenStore::from_mapping(
            json!({
                "base": {"icons": {"value": "res/icons"}},
                "assets": {
                    "logo": {"value": "res/logo.svg"},
                    "icons": {"nav": {"home": {"value": "{base.icons}/home.svg"}}},
                },
                "asset": {"splash": "res/splash.png"},
            })
            .as_object()
            .unwrap()
            .clone(),
        );
        let mut session = ResolutionSession::new(&store);
        let assets = extract_assets(&mut session);

        assert_eq!(assets.len(), 3);
        assert_eq!(assets["icons_nav_home"], LiteralValue::from("res/icons/home.svg"));
        assert_eq!(assets["splash"], LiteralValue::from("res/splash.png"));
    }

    #[test]
    fn test_no_assets() {
        let store = TokenStore::new();
        let mut session = ResolutionSession::new(&store);
        assert!(extract_assets(&mut session).is_empty());
    }
}
