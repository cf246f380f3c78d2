//! Codec error types
//!
//! Error codes:
//! - AERO_CODEC_TRUNCATED (ERROR severity)
//! - AERO_CODEC_INVALID (ERROR severity)
//! - AERO_CODEC_MISMATCH (ERROR severity)

use std::fmt;

use thiserror::Error;

use crate::types::FieldType;

/// Codec error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecErrorCode {
    /// Input ended before a value was complete
    AeroCodecTruncated,
    /// Input bytes do not form a valid encoding
    AeroCodecInvalid,
    /// Decoded values do not match the expected column layout
    AeroCodecMismatch,
}

impl CodecErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            CodecErrorCode::AeroCodecTruncated => "AERO_CODEC_TRUNCATED",
            CodecErrorCode::AeroCodecInvalid => "AERO_CODEC_INVALID",
            CodecErrorCode::AeroCodecMismatch => "AERO_CODEC_MISMATCH",
        }
    }
}

impl fmt::Display for CodecErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Not enough bytes left
    #[error("insufficient bytes to decode value: need {needed}, have {available}")]
    Truncated { needed: usize, available: usize },

    /// Unknown datum flag byte
    #[error("invalid encoded key flag {0}")]
    InvalidFlag(u8),

    /// Memcomparable group marker out of range
    #[error("invalid marker byte {0:#04x}")]
    InvalidMarker(u8),

    /// Memcomparable group padding holds non-zero bytes
    #[error("invalid padding byte in group")]
    InvalidPadding,

    /// Varint longer than 64 bits
    #[error("varint overflows 64-bit integer")]
    VarintOverflow,

    /// Negative or oversized length prefix
    #[error("invalid length prefix {0}")]
    InvalidLength(i64),

    /// VarChar column holds non UTF-8 bytes
    #[error("invalid utf-8 in string column")]
    InvalidUtf8,

    /// Row holds a different number of values than there are fields
    #[error("invalid column count: expected {expected}, got {actual}")]
    ColumnCount { expected: usize, actual: usize },

    /// Decoded value cannot be converted to the column's field type
    #[error("cannot convert {datum} to {field} at column {column}")]
    TypeMismatch {
        column: usize,
        field: FieldType,
        datum: &'static str,
    },
}

impl CodecError {
    /// Shorthand for a truncation error
    pub fn truncated(needed: usize, available: usize) -> Self {
        CodecError::Truncated { needed, available }
    }

    /// Returns the error code
    pub fn code(&self) -> CodecErrorCode {
        match self {
            CodecError::Truncated { .. } => CodecErrorCode::AeroCodecTruncated,
            CodecError::ColumnCount { .. } | CodecError::TypeMismatch { .. } => {
                CodecErrorCode::AeroCodecMismatch
            }
            _ => CodecErrorCode::AeroCodecInvalid,
        }
    }
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
