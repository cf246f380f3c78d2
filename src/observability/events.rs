//! Observable events on the select path
//!
//! Rows have no event of their own; they are only counted in metrics.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Select request received
    SelectStart,
    /// Physical request handed to the transport
    SelectDispatched,
    /// Select failed before dispatch
    SelectRejected,
    /// Transport produced a raw response unit
    ChunkFetched,
    /// Raw response unit parsed into a message
    ChunkParsed,
    /// Chunk failed to read, parse or decode
    ChunkFailed,
    /// All rows of a chunk consumed
    ChunkExhausted,
    /// Transport has no more chunks
    StreamExhausted,
    /// Transport response released
    StreamClosed,
    /// Transport reported a failure
    TransportFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SelectStart => "SELECT_START",
            Event::SelectDispatched => "SELECT_DISPATCHED",
            Event::SelectRejected => "SELECT_REJECTED",
            Event::ChunkFetched => "CHUNK_FETCHED",
            Event::ChunkParsed => "CHUNK_PARSED",
            Event::ChunkFailed => "CHUNK_FAILED",
            Event::ChunkExhausted => "CHUNK_EXHAUSTED",
            Event::StreamExhausted => "STREAM_EXHAUSTED",
            Event::StreamClosed => "STREAM_CLOSED",
            Event::TransportFailed => "TRANSPORT_FAILED",
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::SelectRejected | Event::ChunkFailed | Event::TransportFailed
        )
    }

    /// Returns true for events emitted once per chunk
    pub fn is_per_chunk(&self) -> bool {
        matches!(
            self,
            Event::ChunkFetched | Event::ChunkParsed | Event::ChunkExhausted
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
