//! Pipeline error types.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, IntoStaticStr};

use crate::json::{ToJsonSafe, to_json_safe_via_serde};

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for pipeline operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of pipeline failures.
///
/// Every failure surfaced to a job's caller belongs to exactly one of these
/// kinds. Kinds are distinguished by variant, never by message content, so
/// callers can branch on them without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Payload failed a structural type/shape check.
    Validation,
    /// Structurally valid payload that cannot be routed.
    InvalidRequest,
    /// Engine construction failed.
    Init,
    /// The downstream engine call failed during a well-formed invocation.
    Execution,
}

/// Error type covering validation, routing, lifecycle, and execution.
///
/// Validation and routing failures carry only a message. Lifecycle and
/// execution failures additionally keep the originating error as a source
/// so context is not lost when the payload is normalized for the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Payload failed structural checks.
    #[error("validation failed: {message}")]
    Validation {
        message: Cow<'static, str>,
    },

    /// Payload is well-formed but semantically unroutable.
    ///
    /// The message is the routing contract: callers observe it verbatim.
    #[error("{message}")]
    InvalidRequest {
        message: Cow<'static, str>,
    },

    /// Engine construction failed. Never memoized; the next job retries.
    #[error("engine initialization failed: {message}")]
    Init {
        message: Cow<'static, str>,
        #[source]
        source: Option<BoxedError>,
    },

    /// The downstream engine call failed.
    #[error("execution failed: {message}")]
    Execution {
        message: Cow<'static, str>,
        #[source]
        source: Option<BoxedError>,
    },
}

impl Error {
    /// Creates a validation error with a message.
    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates an invalid-request error with a message.
    pub fn invalid_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates an initialization error with a message.
    pub fn init(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Init {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an initialization error with a message and source.
    pub fn init_with_source(
        message: impl Into<Cow<'static, str>>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Init {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an execution error with a message.
    pub fn execution(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Execution {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an execution error with a message and source.
    pub fn execution_with_source(
        message: impl Into<Cow<'static, str>>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Execution {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            Self::Init { .. } => ErrorKind::Init,
            Self::Execution { .. } => ErrorKind::Execution,
        }
    }

    /// Returns the kind as a static string.
    pub fn kind_str(&self) -> &'static str {
        self.kind().into()
    }

    /// Returns the message carried by this error, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message }
            | Self::InvalidRequest { message }
            | Self::Init { message, .. }
            | Self::Execution { message, .. } => message,
        }
    }
}

/// Normalized failure payload surfaced to the job's caller.
///
/// Serialized with the same JSON-safe conversion as success results, so the
/// caller always receives one of two shapes: the operation's output value or
/// `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable failure description.
    pub error: String,
}

impl ErrorResponse {
    /// Creates an error response with the given message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        Self::new(error.to_string())
    }
}

impl ToJsonSafe for ErrorResponse {
    fn to_json_safe(&self) -> serde_json::Value {
        to_json_safe_via_serde(self)
    }
}
