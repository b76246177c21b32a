//! Embedding input payloads.

use derive_more::From;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The raw payload to embed: a single string, an ordered batch, or a
/// string-keyed mapping.
///
/// Deserialization is untagged, so the external contract stays duck-shaped
/// while the rest of the pipeline works with an explicit union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, From)]
#[serde(untagged)]
pub enum EmbeddingInput {
    /// A single text input.
    Text(String),
    /// An ordered batch of inputs.
    Sequence(Vec<Value>),
    /// A structured input mapping.
    Mapping(Map<String, Value>),
}

impl EmbeddingInput {
    /// Returns the number of individual inputs this payload expands to.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(_) | Self::Mapping(_) => 1,
            Self::Sequence(items) => items.len(),
        }
    }

    /// Returns true if the payload expands to no inputs.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Sequence(items) => items.is_empty(),
            Self::Mapping(map) => map.is_empty(),
        }
    }
}

impl From<&str> for EmbeddingInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_text() {
        let input: EmbeddingInput = serde_json::from_value(json!("hello")).unwrap();
        assert_eq!(input, EmbeddingInput::Text("hello".into()));
        assert_eq!(input.len(), 1);
    }

    #[test]
    fn test_deserialize_sequence() {
        let input: EmbeddingInput = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(input.len(), 2);
        assert!(!input.is_empty());
    }

    #[test]
    fn test_deserialize_mapping() {
        let input: EmbeddingInput = serde_json::from_value(json!({"text": "x"})).unwrap();
        assert!(matches!(input, EmbeddingInput::Mapping(_)));
    }

    #[test]
    fn test_rejects_scalar_number() {
        assert!(serde_json::from_value::<EmbeddingInput>(json!(42)).is_err());
    }

    #[test]
    fn test_empty_string_is_valid_but_empty() {
        let input: EmbeddingInput = serde_json::from_value(json!("")).unwrap();
        assert!(input.is_empty());
    }
}
