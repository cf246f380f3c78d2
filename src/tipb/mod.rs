//! Pushdown wire messages
//!
//! Messages exchanged with the storage servers. The layout is a bincode
//! encoding (little-endian, varint integers, trailing bytes rejected) of the
//! serde structs below; this layer only reads and writes fields.

mod expr;
mod select;

pub use expr::{Expr, ExprType};
pub use select::{
    ColumnInfo, Error, IndexInfo, KeyRange, Row, SelectRequest, SelectResponse, TableInfo,
};

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Result type for message (de)serialization
pub type MessageResult<T> = Result<T, bincode::Error>;

fn options() -> impl Options {
    bincode::options()
        .with_no_limit()
        .with_little_endian()
        .with_varint_encoding()
        .reject_trailing_bytes()
}

/// Serializes a message.
pub fn marshal<T: Serialize>(msg: &T) -> MessageResult<Vec<u8>> {
    options().serialize(msg)
}

/// Deserializes a message, rejecting trailing bytes.
pub fn unmarshal<T: DeserializeOwned>(data: &[u8]) -> MessageResult<T> {
    options().deserialize(data)
}
