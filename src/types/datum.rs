//! Decoded column values

use serde::{Deserialize, Serialize};

/// One decoded column value.
///
/// Byte-like values arrive from the codec as `Bytes` and are only promoted
/// to `String` once the column's field type says so.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Datum {
    Null,
    I64(i64),
    U64(u64),
    F64(f64),
    Bytes(Vec<u8>),
    String(String),
    /// Nanoseconds
    Duration(i64),
}

impl Datum {
    /// Short name of the variant, used in type mismatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            Datum::Null => "null",
            Datum::I64(_) => "i64",
            Datum::U64(_) => "u64",
            Datum::F64(_) => "f64",
            Datum::Bytes(_) => "bytes",
            Datum::String(_) => "string",
            Datum::Duration(_) => "duration",
        }
    }

    /// Returns true for `Datum::Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Datum::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Datum::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Datum {
    fn from(v: i64) -> Self {
        Datum::I64(v)
    }
}

impl From<u64> for Datum {
    fn from(v: u64) -> Self {
        Datum::U64(v)
    }
}

impl From<f64> for Datum {
    fn from(v: f64) -> Self {
        Datum::F64(v)
    }
}

impl From<&str> for Datum {
    fn from(v: &str) -> Self {
        Datum::String(v.to_string())
    }
}

impl From<Vec<u8>> for Datum {
    fn from(v: Vec<u8>) -> Self {
        Datum::Bytes(v)
    }
}
