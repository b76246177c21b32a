//! Mock inference engine for testing.
//!
//! Returns deterministic embeddings and rerank scores so tests can assert
//! on exact payloads, and supports failure injection for exercising the
//! execution-error path.
//!
//! Only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! embry-engine = { version = "...", features = ["test-utils"] }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use embry_core::{Error, Result};

use crate::config::EngineConfig;
use crate::embedding::{EmbeddingObject, EmbeddingsResponse, Usage};
use crate::engine::InferenceEngine;
use crate::input::EmbeddingInput;
use crate::models::{ModelCard, ModelList};
use crate::rerank::{RerankResponse, RerankResult};

/// Configuration for the mock engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    /// Dimensions of mock embedding vectors.
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    /// When set, every capability call fails with this message.
    #[serde(default)]
    pub fail_message: Option<String>,
}

fn default_dimensions() -> usize {
    8
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            dimensions: default_dimensions(),
            fail_message: None,
        }
    }
}

/// Deterministic mock engine.
#[derive(Debug, Clone)]
pub struct MockEngine {
    config: EngineConfig,
    mock: MockConfig,
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new(
            EngineConfig::new(["mock-embed", "mock-rerank"]),
            MockConfig::default(),
        )
    }
}

impl MockEngine {
    /// Creates a mock engine with the given configurations.
    pub fn new(config: EngineConfig, mock: MockConfig) -> Self {
        Self { config, mock }
    }

    /// Creates a mock engine whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(
            EngineConfig::new(["mock-embed"]),
            MockConfig {
                fail_message: Some(message.into()),
                ..MockConfig::default()
            },
        )
    }

    fn check_failure(&self) -> Result<()> {
        match &self.mock.fail_message {
            Some(message) => Err(Error::execution(message.clone())),
            None => Ok(()),
        }
    }

    fn model_or_default(&self, model: Option<String>) -> String {
        model
            .or_else(|| self.config.model_names.first().cloned())
            .unwrap_or_else(|| "mock-embed".to_owned())
    }

    fn vector(&self, index: usize) -> Vec<f32> {
        (0..self.mock.dimensions)
            .map(|d| (index + d) as f32 / 10.0)
            .collect()
    }
}

#[async_trait]
impl InferenceEngine for MockEngine {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    async fn openai_models(&self) -> Result<ModelList> {
        self.check_failure()?;
        let data = self
            .config
            .model_names
            .iter()
            .map(ModelCard::new)
            .collect();
        Ok(ModelList::new(data))
    }

    async fn openai_embeddings(
        &self,
        input: Option<EmbeddingInput>,
        model: Option<String>,
        _as_list: bool,
    ) -> Result<EmbeddingsResponse> {
        self.check_failure()?;
        let input = input.ok_or_else(|| Error::execution("No embedding input provided"))?;

        let count = input.len();
        let data = (0..count)
            .map(|index| EmbeddingObject::new(self.vector(index), index))
            .collect();

        Ok(EmbeddingsResponse::new(
            self.model_or_default(model),
            data,
            Usage::prompt_only(count as u64),
        ))
    }

    async fn rerank(
        &self,
        _query: String,
        docs: Vec<Value>,
        return_docs: bool,
        model: Option<String>,
    ) -> Result<RerankResponse> {
        self.check_failure()?;

        // Scores decay with position so ordering is stable and assertable.
        let results = docs
            .into_iter()
            .enumerate()
            .map(|(index, doc)| {
                let result = RerankResult::new(index, 1.0 / (index as f64 + 1.0));
                if return_docs {
                    result.with_document(doc)
                } else {
                    result
                }
            })
            .collect();

        Ok(RerankResponse::new(
            self.model_or_default(model),
            results,
            Usage::default(),
        ))
    }
}
