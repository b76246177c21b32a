//! The job-handling boundary.

use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use jiff::Timestamp;
use serde_json::Value;

use embry_core::{Error, ErrorResponse, Result, ToJsonSafe};

use crate::TRACING_TARGET;
use crate::executor::stream_job;
use crate::service::ServiceHandle;

/// Handles inbound jobs against a shared service handle.
///
/// One handler serves the whole process; jobs are independent and may run
/// concurrently. The only shared mutable state is the one-time engine
/// initialization inside [`ServiceHandle`].
#[derive(Debug, Clone)]
pub struct JobHandler {
    service: Arc<ServiceHandle>,
}

impl JobHandler {
    /// Creates a handler over the given service handle.
    pub fn new(service: ServiceHandle) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Creates a handler sharing an existing service handle.
    pub fn from_shared(service: Arc<ServiceHandle>) -> Self {
        Self { service }
    }

    /// Processes one job, emitting a single JSON-safe value through the
    /// returned stream.
    ///
    /// The hosting runtime consumes the stream: one `Ok` value on success,
    /// one `Err` on failure, then termination either way.
    pub fn handle(&self, job: Value) -> BoxStream<'static, Result<Value>> {
        stream_job(self.service.clone(), job)
    }

    /// Processes one job to completion and returns its single outcome.
    pub async fn run(&self, job: Value) -> Result<Value> {
        let started_at = Timestamp::now();

        tracing::debug!(target: TRACING_TARGET, "Processing job");

        let mut stream = self.handle(job);
        let result = stream
            .next()
            .await
            .unwrap_or_else(|| Err(Error::execution("stream terminated without a value")));
        let elapsed = Timestamp::now().duration_since(started_at);

        match &result {
            Ok(_) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    elapsed_ms = elapsed.as_millis(),
                    "Job completed"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    kind = error.kind_str(),
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Job failed"
                );
            }
        }

        result
    }

    /// Concurrency ceiling reported to the hosting runtime's admission
    /// controller, forcing engine construction if necessary.
    pub async fn concurrency_limit(&self) -> Result<usize> {
        self.service.concurrency_limit().await
    }

    /// Renders a failure as the normalized `{"error": ...}` payload.
    pub fn error_payload(error: &Error) -> Value {
        ErrorResponse::from(error).to_json_safe()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use embry_engine::mock::MockEngine;

    use super::*;

    #[tokio::test]
    async fn test_run_returns_single_outcome() {
        let handler = JobHandler::new(ServiceHandle::from_engine(MockEngine::default()));
        let value = handler.run(json!({"input": {"input": "hello"}})).await.unwrap();
        assert_eq!(value["data"][0]["object"], "embedding");
    }

    #[tokio::test]
    async fn test_error_payload_shape() {
        let handler = JobHandler::new(ServiceHandle::from_engine(MockEngine::default()));
        let error = handler
            .run(json!({"input": {"openai_route": "/v2/none", "openai_input": {"a": 1}}}))
            .await
            .unwrap_err();

        let payload = JobHandler::error_payload(&error);
        assert_eq!(payload["error"], "Invalid OpenAI Route: /v2/none");
    }
}
