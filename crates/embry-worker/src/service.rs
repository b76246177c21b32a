//! Lazy, process-wide engine handle.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::OnceCell;

use embry_core::{Error, Result};
use embry_engine::InferenceEngine;

type SharedEngine = Arc<dyn InferenceEngine>;
type EngineFuture = Pin<Box<dyn Future<Output = Result<SharedEngine>> + Send>>;
type EngineFactory = Box<dyn Fn() -> EngineFuture + Send + Sync>;

/// At-most-once-initialized reference to the inference engine.
///
/// The engine is constructed on first need. Construction failures are
/// surfaced as [`Error::Init`] and are not memoized, so the next caller
/// retries from scratch; a successful construction is held for the rest of
/// the process. Concurrent first access is serialized by the cell, so the
/// factory runs at most once at a time and never after a success.
pub struct ServiceHandle {
    cell: OnceCell<SharedEngine>,
    factory: EngineFactory,
}

impl std::fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceHandle")
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

impl ServiceHandle {
    /// Creates a handle that will construct the engine with `factory` on
    /// first access.
    pub fn new<F, Fut, E>(factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<E>> + Send + 'static,
        E: InferenceEngine + 'static,
    {
        let factory: EngineFactory = Box::new(move || {
            let fut = factory();
            Box::pin(async move { Ok(Arc::new(fut.await?) as SharedEngine) })
        });
        Self {
            cell: OnceCell::new(),
            factory,
        }
    }

    /// Creates a handle around an already-constructed engine.
    pub fn from_engine<E>(engine: E) -> Self
    where
        E: InferenceEngine + 'static,
    {
        Self {
            cell: OnceCell::new_with(Some(Arc::new(engine) as SharedEngine)),
            factory: Box::new(|| {
                Box::pin(async { Err(Error::init("engine factory unavailable")) })
            }),
        }
    }

    /// Returns the engine, constructing it on first call.
    pub async fn get(&self) -> Result<SharedEngine> {
        let engine = self
            .cell
            .get_or_try_init(|| (self.factory)())
            .await
            .map_err(|error| match error {
                init @ Error::Init { .. } => init,
                other => {
                    let message = other.message().to_owned();
                    Error::Init {
                        message: message.into(),
                        source: Some(Box::new(other)),
                    }
                }
            })?;
        Ok(engine.clone())
    }

    /// Returns the engine's concurrency ceiling, constructing the engine if
    /// it has not been built yet.
    ///
    /// This is the admission callback consumed by the hosting runtime; it
    /// must be callable before any job has executed.
    pub async fn concurrency_limit(&self) -> Result<usize> {
        Ok(self.get().await?.config().max_concurrency)
    }

    /// Returns true if the engine has been constructed.
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}
