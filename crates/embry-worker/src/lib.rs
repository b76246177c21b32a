#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod executor;
mod handler;
mod request;
mod route;
mod service;

pub use embry_core::{Error, ErrorResponse, Result, ToJsonSafe};
pub use executor::{execute, stream_job};
pub use handler::JobHandler;
pub use request::JobInput;
pub use route::Route;
pub use service::ServiceHandle;

/// Tracing target for job handling.
pub const TRACING_TARGET: &str = "embry_worker";
