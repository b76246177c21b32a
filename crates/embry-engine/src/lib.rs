#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod embedding;
mod engine;
mod input;
mod models;
mod rerank;

#[cfg(feature = "test-utils")]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

pub use config::{DEFAULT_MAX_CONCURRENCY, EngineConfig};
pub use embedding::{EmbeddingObject, EmbeddingsResponse, Usage};
pub use embry_core::{Error, Result};
pub use engine::InferenceEngine;
pub use input::EmbeddingInput;
pub use models::{ModelCard, ModelList};
pub use rerank::{RerankResponse, RerankResult};
