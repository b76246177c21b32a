//! Normalized job requests.

use serde::Deserialize;
use serde_json::{Map, Value};

use embry_core::{Error, Result};
use embry_engine::EmbeddingInput;

/// The validated, shape-checked representation of one job's input.
///
/// All fields are optional at this stage; which ones must be present is
/// decided by route resolution, not validation. Unknown extra fields are
/// ignored for forward compatibility. A `JobInput` is constructed once per
/// inbound job and never mutated afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobInput {
    /// The raw payload to embed.
    pub input: Option<EmbeddingInput>,

    /// OpenAI-compatible endpoint path (`/v1/models`, `/v1/embeddings`).
    pub openai_route: Option<String>,

    /// Request body for the OpenAI-compatible route.
    pub openai_input: Option<Map<String, Value>>,

    /// Rerank query; presence selects the rerank operation.
    pub query: Option<String>,

    /// Rerank candidate set.
    pub docs: Option<Vec<Value>>,

    /// Target inference model.
    pub model: Option<String>,

    /// Whether rerank results embed the full document payloads.
    #[serde(default)]
    pub return_docs: bool,
}

impl JobInput {
    /// Validates an untyped payload into a normalized request.
    ///
    /// Validation is structural and non-coercive beyond the widening built
    /// into [`EmbeddingInput`] (a scalar string where a sequence is also
    /// accepted). The serde error text, which names the offending field, is
    /// preserved in the returned [`Error::Validation`].
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone())
            .map_err(|error| Error::validation(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_plain_embedding_payload() {
        let request = JobInput::from_value(&json!({"input": "hello"})).unwrap();
        assert_eq!(request.input, Some(EmbeddingInput::Text("hello".into())));
        assert!(request.openai_route.is_none());
        assert!(!request.return_docs);
    }

    #[test]
    fn test_rerank_payload() {
        let request = JobInput::from_value(&json!({
            "query": "q",
            "docs": ["a", "b"],
            "model": "m",
            "return_docs": true,
        }))
        .unwrap();
        assert_eq!(request.query.as_deref(), Some("q"));
        assert_eq!(request.docs.as_ref().map(Vec::len), Some(2));
        assert!(request.return_docs);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let request = JobInput::from_value(&json!({
            "input": "x",
            "webhook": "https://example.com/done",
        }))
        .unwrap();
        assert!(request.input.is_some());
    }

    #[test]
    fn test_wrong_type_fails_validation() {
        let error = JobInput::from_value(&json!({"query": 42})).unwrap_err();
        assert!(matches!(error, Error::Validation { .. }));
    }

    #[test]
    fn test_input_accepts_all_three_shapes() {
        for payload in [json!("text"), json!(["a", "b"]), json!({"text": "x"})] {
            let request = JobInput::from_value(&json!({ "input": payload })).unwrap();
            assert!(request.input.is_some());
        }
    }
}
