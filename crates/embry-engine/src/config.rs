//! Engine configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default maximum number of jobs the engine accepts concurrently.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Configuration for the inference engine.
///
/// The concurrency ceiling is read by the hosting runtime on every admission
/// decision, so it must be available as soon as the engine is constructed,
/// before any job has executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct EngineConfig {
    /// Maximum number of jobs processed simultaneously.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "engine-max-concurrency",
            env = "ENGINE_MAX_CONCURRENCY",
            default_value_t = DEFAULT_MAX_CONCURRENCY
        )
    )]
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Names of the models served by this engine, in load order.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "engine-model-names",
            env = "ENGINE_MODEL_NAMES",
            value_delimiter = ','
        )
    )]
    #[serde(default)]
    pub model_names: Vec<String>,
}

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            model_names: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Creates a configuration serving the given models.
    pub fn new(model_names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            model_names: model_names.into_iter().map(Into::into).collect(),
        }
    }

    /// Sets the concurrency ceiling.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}
