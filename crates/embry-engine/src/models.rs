//! OpenAI-compatible model listing types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use embry_core::{ToJsonSafe, to_json_safe_via_serde};

/// A single served model, in OpenAI `/v1/models` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCard {
    /// Model identifier.
    pub id: String,
    /// Object discriminator, always `"model"`.
    pub object: String,
    /// Unix timestamp (seconds) of when the model became available.
    pub created: i64,
    /// Owning organization.
    pub owned_by: String,
}

impl ModelCard {
    /// Creates a card for a model that became available now.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            object: "model".to_owned(),
            created: Timestamp::now().as_second(),
            owned_by: "embry".to_owned(),
        }
    }
}

/// The OpenAI-compatible model list envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelList {
    /// Object discriminator, always `"list"`.
    pub object: String,
    /// The served models.
    pub data: Vec<ModelCard>,
}

impl ModelList {
    /// Creates a model list from the given cards.
    pub fn new(data: Vec<ModelCard>) -> Self {
        Self {
            object: "list".to_owned(),
            data,
        }
    }
}

impl ToJsonSafe for ModelList {
    fn to_json_safe(&self) -> serde_json::Value {
        to_json_safe_via_serde(self)
    }
}
