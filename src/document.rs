//! Order-preserving representation of an untyped design document.
//!
//! Figma files have no schema the extractor can rely on, so the tree is held
//! as a closed sum type and every field access goes through an explicit
//! optional lookup. Mapping keys keep the order they had in the source JSON,
//! which makes every "first match wins" rule reproducible.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::{FttError, Result};

/// A leaf value of the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

/// A node of the design document tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DocumentNode {
    Scalar(Scalar),
    Sequence(Vec<DocumentNode>),
    Mapping(IndexMap<String, DocumentNode>),
}

impl DocumentNode {
    /// Parse a JSON document, keeping key order.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).map_err(FttError::Serialization)?;
        if !value.is_object() {
            return Err(FttError::InvalidDocument(format!(
                "expected a JSON object at the document root, found {}",
                json_kind(&value)
            )));
        }
        Ok(Self::from(value))
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, DocumentNode>> {
        match self {
            DocumentNode::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[DocumentNode]> {
        match self {
            DocumentNode::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocumentNode::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DocumentNode::Scalar(Scalar::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    /// Field lookup; `None` for missing keys and for non-mapping nodes.
    pub fn get(&self, key: &str) -> Option<&DocumentNode> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Text of a string or number scalar, numbers printed the way JSON prints them.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            DocumentNode::Scalar(Scalar::String(s)) => Some(s.clone()),
            DocumentNode::Scalar(Scalar::Number(n)) => Some(number_text(n)),
            _ => None,
        }
    }
}

impl From<Value> for DocumentNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => DocumentNode::Scalar(Scalar::Null),
            Value::Bool(b) => DocumentNode::Scalar(Scalar::Bool(b)),
            Value::Number(n) => DocumentNode::Scalar(Scalar::Number(n)),
            Value::String(s) => DocumentNode::Scalar(Scalar::String(s)),
            Value::Array(items) => {
                DocumentNode::Sequence(items.into_iter().map(DocumentNode::from).collect())
            }
            Value::Object(map) => DocumentNode::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, DocumentNode::from(value)))
                    .collect(),
            ),
        }
    }
}

impl<'de> Deserialize<'de> for DocumentNode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(DocumentNode::from)
    }
}

/// Render a number without a trailing `.0` for integral values (`32`, `32.5`).
pub fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mapping_keeps_source_key_order() {
        let doc = DocumentNode::from_json_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#)
            .expect("parse");
        let keys: Vec<&str> = doc
            .as_mapping()
            .expect("mapping")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn root_must_be_an_object() {
        let err = DocumentNode::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, FttError::InvalidDocument(_)));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = DocumentNode::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, FttError::Serialization(_)));
    }

    #[test]
    fn get_is_none_for_scalars_and_missing_keys() {
        let doc = DocumentNode::from(json!({"name": "Frame", "fills": []}));
        assert_eq!(doc.get("name").and_then(DocumentNode::as_str), Some("Frame"));
        assert!(doc.get("missing").is_none());
        assert!(doc.get("name").and_then(|n| n.get("x")).is_none());
        assert_eq!(doc.get("fills").and_then(DocumentNode::as_sequence).map(<[_]>::len), Some(0));
    }

    #[test]
    fn scalar_text_prints_numbers_like_json() {
        let doc = DocumentNode::from(json!({"a": 32, "b": 32.5, "c": 32.0, "d": "14", "e": true}));
        assert_eq!(doc.get("a").and_then(DocumentNode::scalar_text).as_deref(), Some("32"));
        assert_eq!(doc.get("b").and_then(DocumentNode::scalar_text).as_deref(), Some("32.5"));
        assert_eq!(doc.get("c").and_then(DocumentNode::scalar_text).as_deref(), Some("32"));
        assert_eq!(doc.get("d").and_then(DocumentNode::scalar_text).as_deref(), Some("14"));
        assert!(doc.get("e").and_then(DocumentNode::scalar_text).is_none());
    }

    #[test]
    fn deserialize_goes_through_value() {
        let doc: DocumentNode = serde_json::from_str(r#"{"b": [1, null], "a": {"x": "y"}}"#)
            .expect("deserialize");
        let map = doc.as_mapping().expect("mapping");
        assert_eq!(map.keys().next().map(String::as_str), Some("b"));
        assert_eq!(
            doc.get("a").and_then(|a| a.get("x")).and_then(DocumentNode::as_str),
            Some("y")
        );
    }
}
