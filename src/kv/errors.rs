//! Transport error types

use std::io;

use thiserror::Error;

/// Result type for transport operations
pub type KvResult<T> = Result<T, KvError>;

/// Errors reported by a transport
#[derive(Debug, Error)]
pub enum KvError {
    /// Target region could not serve the request
    #[error("Region unavailable: {0}")]
    RegionUnavailable(String),

    /// Network or server side failure
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Response used after close
    #[error("Response already closed")]
    Closed,

    /// I/O failure underneath the transport
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
