//! Operation invocation and result streaming.

use std::sync::Arc;

use async_stream::try_stream;
use futures_util::stream::BoxStream;
use serde_json::{Map, Value};

use embry_core::{Error, Result, ToJsonSafe};
use embry_engine::InferenceEngine;

use crate::TRACING_TARGET;
use crate::request::JobInput;
use crate::route::Route;
use crate::service::ServiceHandle;

/// Invokes the resolved operation on the engine and converts the result to
/// a JSON-safe value.
///
/// Engine failures surface as [`Error::Execution`] with the original
/// message preserved; they are never folded into an inline error value
/// here. The caller's error-normalization boundary renders them.
pub async fn execute(engine: Arc<dyn InferenceEngine>, route: Route) -> Result<Value> {
    let result = match route {
        Route::ListModels => engine
            .openai_models()
            .await
            .map(|models| models.to_json_safe()),
        Route::Embeddings {
            input,
            model,
            as_list,
        } => engine
            .openai_embeddings(input, model, as_list)
            .await
            .map(|response| response.to_json_safe()),
        Route::Rerank {
            query,
            docs,
            return_docs,
            model,
        } => engine
            .rerank(query, docs, return_docs, model)
            .await
            .map(|response| response.to_json_safe()),
    };

    result.map_err(as_execution)
}

/// Runs the full pipeline for one job and emits the outcome as a stream.
///
/// The stream yields exactly one JSON-safe value on success, then
/// terminates. Any failure in validation, resolution, engine construction,
/// or execution is the stream's single `Err` item.
pub fn stream_job(handle: Arc<ServiceHandle>, job: Value) -> BoxStream<'static, Result<Value>> {
    Box::pin(try_stream! {
        let payload = job
            .get("input")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));

        let request = JobInput::from_value(&payload)?;
        let route = Route::resolve(&request, &job)?;

        tracing::debug!(
            target: TRACING_TARGET,
            route = route.name(),
            "Resolved job route"
        );

        let engine = handle.get().await?;
        let value = execute(engine, route).await?;
        yield value;
    })
}

fn as_execution(error: Error) -> Error {
    match error {
        execution @ Error::Execution { .. } => execution,
        other => {
            let message = other.message().to_owned();
            Error::Execution {
                message: message.into(),
                source: Some(Box::new(other)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use futures_util::StreamExt;
    use serde_json::json;

    use embry_engine::mock::MockEngine;

    use super::*;

    fn handle() -> Arc<ServiceHandle> {
        Arc::new(ServiceHandle::from_engine(MockEngine::default()))
    }

    #[tokio::test]
    async fn test_stream_yields_exactly_one_value() {
        let mut stream = stream_job(handle(), json!({"input": {"input": "hello"}}));

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first["object"], "list");
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_stream_surfaces_resolution_failure() {
        let mut stream = stream_job(handle(), json!({"input": {"model": "m"}}));

        let error = stream.next().await.unwrap().unwrap_err();
        assert!(matches!(error, Error::InvalidRequest { .. }));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_missing_job_input_key_defaults_to_empty() {
        let mut stream = stream_job(handle(), json!({"id": "job-1"}));

        let error = stream.next().await.unwrap().unwrap_err();
        assert!(error.to_string().starts_with("Invalid input:"));
    }

    #[tokio::test]
    async fn test_engine_failure_is_execution_error() {
        let handle = Arc::new(ServiceHandle::from_engine(MockEngine::failing(
            "model crashed",
        )));
        let mut stream = stream_job(handle, json!({"input": {"input": "x"}}));

        let error = stream.next().await.unwrap().unwrap_err();
        assert!(matches!(error, Error::Execution { .. }));
        assert!(error.to_string().contains("model crashed"));
    }

    #[tokio::test]
    async fn test_output_conversion_is_idempotent() {
        let mut stream = stream_job(handle(), json!({"input": {"input": "hello"}}));
        let value = stream.next().await.unwrap().unwrap();
        assert_eq!(value.to_json_safe(), value);
    }
}
