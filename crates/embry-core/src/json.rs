//! JSON-safe result conversion.
//!
//! Every value that crosses the job boundary is converted to a
//! [`serde_json::Value`] through the [`ToJsonSafe`] capability. Result types
//! returned from the engine implement it explicitly, which keeps the
//! conversion deterministic: no runtime probing of export methods.

use std::fmt;

use serde::Serialize;
use serde_json::{Value, json};

/// Conversion into a JSON-safe value.
///
/// Implementations must be idempotent when chained through
/// [`serde_json::Value`]: converting an already-converted value returns it
/// unchanged.
pub trait ToJsonSafe {
    /// Converts this value into a JSON-safe representation.
    fn to_json_safe(&self) -> Value;
}

impl ToJsonSafe for Value {
    fn to_json_safe(&self) -> Value {
        self.clone()
    }
}

/// Converts a serializable value to JSON, falling back to a single-field
/// wrapper around its debug representation if serialization fails.
///
/// The fallback keeps the contract total: a conversion never errors, it
/// degrades to `{"value": "..."}`.
pub fn to_json_safe_via_serde<T>(value: &T) -> Value
where
    T: Serialize + fmt::Debug,
{
    serde_json::to_value(value).unwrap_or_else(|_| json!({ "value": format!("{value:?}") }))
}
