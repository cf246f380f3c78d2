//! Column field types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Semantic type of one projected column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Column that is always NULL
    Null,
    /// Signed 64-bit integer
    Int,
    /// Unsigned 64-bit integer
    UnsignedInt,
    /// Single precision float (widened to f64 after decode)
    Float,
    /// Double precision float
    Double,
    /// UTF-8 string
    VarChar,
    /// Raw bytes
    Blob,
    /// Duration in nanoseconds
    Duration,
}

impl FieldType {
    /// Returns the canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Null => "null",
            FieldType::Int => "int",
            FieldType::UnsignedInt => "uint",
            FieldType::Float => "float",
            FieldType::Double => "double",
            FieldType::VarChar => "varchar",
            FieldType::Blob => "blob",
            FieldType::Duration => "duration",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "null" => Ok(FieldType::Null),
            "int" | "bigint" => Ok(FieldType::Int),
            "uint" | "unsigned" => Ok(FieldType::UnsignedInt),
            "float" => Ok(FieldType::Float),
            "double" => Ok(FieldType::Double),
            "varchar" | "string" => Ok(FieldType::VarChar),
            "blob" | "bytes" => Ok(FieldType::Blob),
            "duration" => Ok(FieldType::Duration),
            other => Err(format!("unknown field type: {}", other)),
        }
    }
}
