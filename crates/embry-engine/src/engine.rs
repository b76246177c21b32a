//! The inference-engine capability surface.

use async_trait::async_trait;
use serde_json::Value;

use embry_core::Result;

use crate::config::EngineConfig;
use crate::embedding::EmbeddingsResponse;
use crate::input::EmbeddingInput;
use crate::models::ModelList;
use crate::rerank::RerankResponse;

/// Capabilities required of the downstream inference engine.
///
/// The engine is opaque to the dispatch layer: it owns the actual embedding
/// and rerank computation, model loading, and batching. Implementations are
/// shared behind `Arc<dyn InferenceEngine>` and must be safe to call from
/// concurrently running jobs.
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Read-only engine configuration.
    ///
    /// Available immediately after construction; the hosting runtime reads
    /// the concurrency ceiling from it before any job has executed.
    fn config(&self) -> &EngineConfig;

    /// Lists the models served by this engine.
    async fn openai_models(&self) -> Result<ModelList>;

    /// Generates embeddings for the given input.
    ///
    /// `input` is `None` when the caller's `openai_input` mapping carried no
    /// `input` key; the engine decides whether that is an error. `model` is
    /// `None` to select the engine's default model. `as_list` requests the
    /// vectors as plain lists rather than a packed encoding.
    async fn openai_embeddings(
        &self,
        input: Option<EmbeddingInput>,
        model: Option<String>,
        as_list: bool,
    ) -> Result<EmbeddingsResponse>;

    /// Ranks `docs` by relevance to `query`.
    ///
    /// When `return_docs` is set, each result embeds the candidate document.
    async fn rerank(
        &self,
        query: String,
        docs: Vec<Value>,
        return_docs: bool,
        model: Option<String>,
    ) -> Result<RerankResponse>;
}
