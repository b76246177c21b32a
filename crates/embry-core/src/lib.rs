#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod json;

pub use error::{BoxedError, Error, ErrorKind, ErrorResponse, Result};
pub use json::{ToJsonSafe, to_json_safe_via_serde};
