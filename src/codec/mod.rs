//! Low-level value codec
//!
//! Byte encodings shared by keys and row values:
//!
//! - comparable integers and floats (fixed 8 bytes, big-endian, sign-flipped
//!   so that byte order matches numeric order)
//! - zigzag varints and LEB128 uvarints for compact row values
//! - memcomparable byte groups for keys, length-prefixed bytes for values
//! - flag-prefixed datums built on all of the above
//!
//! Every decoder returns the number of bytes it consumed so that callers can
//! walk a buffer holding several encoded values back to back.

mod bytes;
mod datum;
mod errors;
mod number;

pub use bytes::{decode_bytes, decode_compact_bytes, encode_bytes, encode_compact_bytes};
pub use datum::{decode, decode_one, encode_key, encode_value, flag};
pub use errors::{CodecError, CodecErrorCode, CodecResult};
pub use number::{
    decode_float, decode_int, decode_uint, decode_uvarint, decode_varint, encode_float,
    encode_int, encode_uint, encode_uvarint, encode_varint,
};
