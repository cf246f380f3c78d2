//! Cluster transport interface
//!
//! The select path only talks to the cluster through these traits. A
//! `Client` turns a physical `Request` into a `Response`, which hands out one
//! raw response unit (an unread byte stream) per call until it is exhausted.
//! Retries, region routing and parallel sub-range fetches all live behind the
//! trait and are invisible here.

mod errors;
mod request;

pub use errors::{KvError, KvResult};
pub use request::{KeyRange, ReqType, Request};

use std::io::Read;

/// One raw response unit: an unread byte stream holding a single message.
pub type ResponseData = Box<dyn Read + Send>;

/// Sends physical requests to the cluster.
pub trait Client {
    /// Dispatches a request. `None` means the client could not produce a
    /// response at all.
    fn send(&self, req: Request) -> Option<Box<dyn Response>>;

    /// Reports whether the cluster handles requests of this kind.
    fn support_request_type(&self, tp: ReqType, sub_type: i64) -> bool;
}

/// Streamed response for one request.
pub trait Response: Send {
    /// Returns the next raw unit, `Ok(None)` once the stream is exhausted.
    fn next(&mut self) -> KvResult<Option<ResponseData>>;

    /// Releases the response and any in-flight work behind it.
    fn close(&mut self) -> KvResult<()>;
}
