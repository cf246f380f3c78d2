//! Select path error types
//!
//! Error codes:
//! - AERO_XAPI_SERIALIZATION: request payload could not be encoded
//! - AERO_XAPI_TRANSPORT: transport failed or returned no response
//! - AERO_XAPI_MALFORMED_STREAM: response bytes could not be read
//! - AERO_XAPI_MALFORMED_MESSAGE: response bytes are not a message
//! - AERO_XAPI_VALUE_DECODE: a row's column bytes are corrupt
//! - AERO_XAPI_HANDLE_DECODE: a row's handle bytes are corrupt
//! - AERO_XAPI_REMOTE: server reported an error inside a response
//! - AERO_XAPI_CHUNK_POISONED: chunk used after one of the above
//! - AERO_XAPI_CONFIG: invalid select configuration
//!
//! Nothing here is retried. End of data is never an error.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::codec::CodecError;
use crate::kv::KvError;

/// Select path error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XapiErrorCode {
    AeroXapiSerialization,
    AeroXapiTransport,
    AeroXapiMalformedStream,
    AeroXapiMalformedMessage,
    AeroXapiValueDecode,
    AeroXapiHandleDecode,
    AeroXapiRemote,
    AeroXapiChunkPoisoned,
    AeroXapiConfig,
}

impl XapiErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            XapiErrorCode::AeroXapiSerialization => "AERO_XAPI_SERIALIZATION",
            XapiErrorCode::AeroXapiTransport => "AERO_XAPI_TRANSPORT",
            XapiErrorCode::AeroXapiMalformedStream => "AERO_XAPI_MALFORMED_STREAM",
            XapiErrorCode::AeroXapiMalformedMessage => "AERO_XAPI_MALFORMED_MESSAGE",
            XapiErrorCode::AeroXapiValueDecode => "AERO_XAPI_VALUE_DECODE",
            XapiErrorCode::AeroXapiHandleDecode => "AERO_XAPI_HANDLE_DECODE",
            XapiErrorCode::AeroXapiRemote => "AERO_XAPI_REMOTE",
            XapiErrorCode::AeroXapiChunkPoisoned => "AERO_XAPI_CHUNK_POISONED",
            XapiErrorCode::AeroXapiConfig => "AERO_XAPI_CONFIG",
        }
    }

    /// Returns true if the error only ends the current chunk.
    ///
    /// The stream itself may still hand out further chunks.
    pub fn is_chunk_scoped(&self) -> bool {
        matches!(
            self,
            XapiErrorCode::AeroXapiMalformedStream
                | XapiErrorCode::AeroXapiMalformedMessage
                | XapiErrorCode::AeroXapiValueDecode
                | XapiErrorCode::AeroXapiHandleDecode
                | XapiErrorCode::AeroXapiRemote
                | XapiErrorCode::AeroXapiChunkPoisoned
        )
    }
}

impl fmt::Display for XapiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Select path errors
#[derive(Debug, Error)]
pub enum XapiError {
    /// Logical request could not be serialized into the payload
    #[error("Serialization failed: {context}: {source}")]
    Serialization {
        context: String,
        #[source]
        source: bincode::Error,
    },

    /// Transport failure, or no response from the client
    #[error("Transport failed: {context}")]
    Transport {
        context: String,
        #[source]
        source: Option<KvError>,
    },

    /// Raw response unit could not be read to completion
    #[error("Malformed stream: {context}: {source}")]
    MalformedStream {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Raw response bytes are not a response message
    #[error("Malformed message: {context}: {source}")]
    MalformedMessage {
        context: String,
        #[source]
        source: bincode::Error,
    },

    /// Row column values could not be decoded
    #[error("Value decode failed at row {row}: {source}")]
    ValueDecode {
        row: usize,
        #[source]
        source: CodecError,
    },

    /// Row handle could not be decoded
    #[error("Handle decode failed at row {row}: {source}")]
    HandleDecode {
        row: usize,
        #[source]
        source: CodecError,
    },

    /// Server reported an error for this chunk
    #[error("Remote error {code}: {msg}")]
    Remote { code: i32, msg: String },

    /// Chunk already failed with the given code
    #[error("Chunk unusable after earlier {0} failure")]
    ChunkPoisoned(XapiErrorCode),

    /// Invalid select configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl XapiError {
    /// Transport error with no underlying transport cause
    pub fn no_response(context: impl Into<String>) -> Self {
        XapiError::Transport {
            context: context.into(),
            source: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> XapiErrorCode {
        match self {
            XapiError::Serialization { .. } => XapiErrorCode::AeroXapiSerialization,
            XapiError::Transport { .. } => XapiErrorCode::AeroXapiTransport,
            XapiError::MalformedStream { .. } => XapiErrorCode::AeroXapiMalformedStream,
            XapiError::MalformedMessage { .. } => XapiErrorCode::AeroXapiMalformedMessage,
            XapiError::ValueDecode { .. } => XapiErrorCode::AeroXapiValueDecode,
            XapiError::HandleDecode { .. } => XapiErrorCode::AeroXapiHandleDecode,
            XapiError::Remote { .. } => XapiErrorCode::AeroXapiRemote,
            XapiError::ChunkPoisoned(_) => XapiErrorCode::AeroXapiChunkPoisoned,
            XapiError::Config(_) => XapiErrorCode::AeroXapiConfig,
        }
    }
}

/// Result type for select path operations
pub type XapiResult<T> = Result<T, XapiError>;
