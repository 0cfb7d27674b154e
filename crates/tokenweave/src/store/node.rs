//! Tree nodes of the token store.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::value::LiteralValue;

/// Children of a group node, keyed by name.
pub type TokenGroup = BTreeMap<String, TokenNode>;

/// A token definition: a source mapping that carries a `value` key.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub value: LiteralValue,
    /// The `type` tag. Metadata only; resolution never reads it.
    pub kind: Option<String>,
    pub description: Option<String>,
}

/// One node of the token tree.
///
/// The variant is decided once, at parse time: a mapping with a `value` key
/// is a [`TokenNode::Token`], any other mapping is a [`TokenNode::Group`],
/// and everything else is a bare [`TokenNode::Literal`].
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Token(Token),
    Group(TokenGroup),
    Literal(LiteralValue),
}

impl TokenNode {
    /// Parses a JSON value into a node. `null` (and a token whose value is
    /// `null`) produces no node.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Self::from_mapping(map),
            other => LiteralValue::from_json(other).map(TokenNode::Literal),
        }
    }

    fn from_mapping(mut map: Map<String, Value>) -> Option<Self> {
        if let Some(raw) = map.remove("value") {
            let value = LiteralValue::from_json(raw)?;
            let kind = map
                .get("type")
                .and_then(Value::as_str)
                .map(str::to_string);
            let description = map
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string);
            return Some(TokenNode::Token(Token {
                value,
                kind,
                description,
            }));
        }

        Some(TokenNode::Group(parse_group(map)))
    }

    /// The value carried by a leaf (`Token` or `Literal`); `None` for groups.
    pub fn leaf_value(&self) -> Option<&LiteralValue> {
        match self {
            TokenNode::Token(token) => Some(&token.value),
            TokenNode::Literal(value) => Some(value),
            TokenNode::Group(_) => None,
        }
    }

    /// The value of a `Token` node only.
    pub fn token_value(&self) -> Option<&LiteralValue> {
        match self {
            TokenNode::Token(token) => Some(&token.value),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&TokenGroup> {
        match self {
            TokenNode::Group(children) => Some(children),
            _ => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, TokenNode::Group(_))
    }
}

/// Parses the entries of a JSON mapping into group children.
pub(crate) fn parse_group(map: Map<String, Value>) -> TokenGroup {
    map.into_iter()
        .filter_map(|(key, value)| TokenNode::from_json(value).map(|node| (key, node)))
        .collect()
}
