//! Flag-prefixed datum encoding
//!
//! Each datum is written as one flag byte followed by the payload for that
//! flag. Keys use the comparable payloads (`INT`, `UINT`, `BYTES`), row values
//! use the compact ones (`VARINT`, `UVARINT`, `COMPACT_BYTES`). The decoder
//! accepts both.

use super::bytes::{decode_bytes, decode_compact_bytes, encode_bytes, encode_compact_bytes};
use super::errors::{CodecError, CodecResult};
use super::number::{
    decode_float, decode_int, decode_uint, decode_uvarint, decode_varint, encode_float,
    encode_int, encode_uint, encode_uvarint, encode_varint,
};
use crate::types::Datum;

/// Datum flag bytes.
pub mod flag {
    pub const NIL: u8 = 0;
    pub const BYTES: u8 = 1;
    pub const COMPACT_BYTES: u8 = 2;
    pub const INT: u8 = 3;
    pub const UINT: u8 = 4;
    pub const FLOAT: u8 = 5;
    pub const DECIMAL: u8 = 6;
    pub const DURATION: u8 = 7;
    pub const VARINT: u8 = 8;
    pub const UVARINT: u8 = 9;
    pub const MAX: u8 = 250;
}

/// Encodes datums in comparable form, suitable for index keys.
pub fn encode_key(datums: &[Datum]) -> Vec<u8> {
    let mut buf = Vec::new();
    for d in datums {
        match d {
            Datum::Null => buf.push(flag::NIL),
            Datum::I64(v) => {
                buf.push(flag::INT);
                encode_int(&mut buf, *v);
            }
            Datum::U64(v) => {
                buf.push(flag::UINT);
                encode_uint(&mut buf, *v);
            }
            Datum::F64(v) => {
                buf.push(flag::FLOAT);
                encode_float(&mut buf, *v);
            }
            Datum::Bytes(b) => {
                buf.push(flag::BYTES);
                encode_bytes(&mut buf, b);
            }
            Datum::String(s) => {
                buf.push(flag::BYTES);
                encode_bytes(&mut buf, s.as_bytes());
            }
            Datum::Duration(ns) => {
                buf.push(flag::DURATION);
                encode_int(&mut buf, *ns);
            }
        }
    }
    buf
}

/// Encodes datums in compact form, suitable for row values.
pub fn encode_value(datums: &[Datum]) -> Vec<u8> {
    let mut buf = Vec::new();
    for d in datums {
        match d {
            Datum::Null => buf.push(flag::NIL),
            Datum::I64(v) => {
                buf.push(flag::VARINT);
                encode_varint(&mut buf, *v);
            }
            Datum::U64(v) => {
                buf.push(flag::UVARINT);
                encode_uvarint(&mut buf, *v);
            }
            Datum::F64(v) => {
                buf.push(flag::FLOAT);
                encode_float(&mut buf, *v);
            }
            Datum::Bytes(b) => {
                buf.push(flag::COMPACT_BYTES);
                encode_compact_bytes(&mut buf, b);
            }
            Datum::String(s) => {
                buf.push(flag::COMPACT_BYTES);
                encode_compact_bytes(&mut buf, s.as_bytes());
            }
            Datum::Duration(ns) => {
                buf.push(flag::DURATION);
                encode_int(&mut buf, *ns);
            }
        }
    }
    buf
}

/// Decodes one datum, returning `(bytes_consumed, datum)`.
pub fn decode_one(b: &[u8]) -> CodecResult<(usize, Datum)> {
    let (&f, rest) = b.split_first().ok_or_else(|| CodecError::truncated(1, 0))?;
    let (n, datum) = match f {
        flag::NIL => (0, Datum::Null),
        flag::INT => {
            let (n, v) = decode_int(rest)?;
            (n, Datum::I64(v))
        }
        flag::UINT => {
            let (n, v) = decode_uint(rest)?;
            (n, Datum::U64(v))
        }
        flag::VARINT => {
            let (n, v) = decode_varint(rest)?;
            (n, Datum::I64(v))
        }
        flag::UVARINT => {
            let (n, v) = decode_uvarint(rest)?;
            (n, Datum::U64(v))
        }
        flag::FLOAT => {
            let (n, v) = decode_float(rest)?;
            (n, Datum::F64(v))
        }
        flag::BYTES => {
            let (n, v) = decode_bytes(rest)?;
            (n, Datum::Bytes(v))
        }
        flag::COMPACT_BYTES => {
            let (n, v) = decode_compact_bytes(rest)?;
            (n, Datum::Bytes(v))
        }
        flag::DURATION => {
            let (n, v) = decode_int(rest)?;
            (n, Datum::Duration(v))
        }
        // Decimal columns are not part of the supported field types.
        other => return Err(CodecError::InvalidFlag(other)),
    };
    Ok((n + 1, datum))
}

/// Decodes every datum in `b`.
pub fn decode(mut b: &[u8]) -> CodecResult<Vec<Datum>> {
    let mut datums = Vec::new();
    while !b.is_empty() {
        let (n, d) = decode_one(b)?;
        datums.push(d);
        b = &b[n..];
    }
    Ok(datums)
}
