//! Rerank response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use embry_core::{ToJsonSafe, to_json_safe_via_serde};

use crate::embedding::Usage;

/// One ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankResult {
    /// Position of the candidate in the request's document list.
    pub index: usize,
    /// Relevance of the candidate to the query, higher is more relevant.
    pub relevance_score: f64,
    /// The candidate document, present only when the request asked for it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Value>,
}

impl RerankResult {
    /// Creates a result without the document payload.
    pub fn new(index: usize, relevance_score: f64) -> Self {
        Self {
            index,
            relevance_score,
            document: None,
        }
    }

    /// Attaches the candidate document to this result.
    pub fn with_document(mut self, document: Value) -> Self {
        self.document = Some(document);
        self
    }
}

/// The rerank envelope, ordered by descending relevance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankResponse {
    /// Ranked candidates, most relevant first.
    pub results: Vec<RerankResult>,
    /// The model that produced the ranking.
    pub model: String,
    /// Token accounting.
    pub usage: Usage,
}

impl RerankResponse {
    /// Creates a response for the given model and results.
    pub fn new(model: impl Into<String>, results: Vec<RerankResult>, usage: Usage) -> Self {
        Self {
            results,
            model: model.into(),
            usage,
        }
    }
}

impl ToJsonSafe for RerankResponse {
    fn to_json_safe(&self) -> serde_json::Value {
        to_json_safe_via_serde(self)
    }
}
