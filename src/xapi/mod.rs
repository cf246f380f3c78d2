//! Client side of the select pushdown protocol
//!
//! # Flow
//!
//! 1. `compose_request` maps a logical `SelectRequest` to a physical
//!    `kv::Request` (request type, raw key ranges, serialized payload)
//! 2. `select` sends it through a `kv::Client` and wraps the response in a
//!    `SelectResult`
//! 3. `SelectResult::next` yields one `SubResult` per response chunk
//! 4. `SubResult::next` decodes one `(handle, values)` row per call
//!
//! Iteration is a single-threaded pull: nothing here spawns work, and at most
//! one chunk's message is buffered per live `SubResult`.

mod config;
mod errors;
mod result;
mod select;
mod support;

pub use config::SelectConfig;
pub use errors::{XapiError, XapiErrorCode, XapiResult};
pub use result::{ChunkRows, Row, SelectResult, SelectRows, SubResult};
pub use select::{compose_request, select, select_with_config};
pub use support::support_expression;
