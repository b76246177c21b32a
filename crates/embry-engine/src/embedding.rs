//! OpenAI-compatible embedding response types.

use serde::{Deserialize, Serialize};

use embry_core::{ToJsonSafe, to_json_safe_via_serde};

/// Token accounting for one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt(s).
    pub prompt_tokens: u64,
    /// Total tokens consumed.
    pub total_tokens: u64,
}

impl Usage {
    /// Creates a usage record where all tokens are prompt tokens.
    pub fn prompt_only(tokens: u64) -> Self {
        Self {
            prompt_tokens: tokens,
            total_tokens: tokens,
        }
    }
}

/// One embedding vector within a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingObject {
    /// Object discriminator, always `"embedding"`.
    pub object: String,
    /// The embedding vector.
    pub embedding: Vec<f32>,
    /// Position of the corresponding input in the request batch.
    pub index: usize,
}

impl EmbeddingObject {
    /// Creates an embedding object at the given batch index.
    pub fn new(embedding: Vec<f32>, index: usize) -> Self {
        Self {
            object: "embedding".to_owned(),
            embedding,
            index,
        }
    }
}

/// The OpenAI-compatible embeddings envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsResponse {
    /// Object discriminator, always `"list"`.
    pub object: String,
    /// One entry per input, ordered by request index.
    pub data: Vec<EmbeddingObject>,
    /// The model that produced the embeddings.
    pub model: String,
    /// Token accounting.
    pub usage: Usage,
}

impl EmbeddingsResponse {
    /// Creates a response for the given model and vectors.
    pub fn new(model: impl Into<String>, data: Vec<EmbeddingObject>, usage: Usage) -> Self {
        Self {
            object: "list".to_owned(),
            data,
            model: model.into(),
            usage,
        }
    }

    /// Number of embeddings in the response.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the response carries no embeddings.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl ToJsonSafe for EmbeddingsResponse {
    fn to_json_safe(&self) -> serde_json::Value {
        to_json_safe_via_serde(self)
    }
}
