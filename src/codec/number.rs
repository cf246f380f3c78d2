//! Integer and float encodings

use super::errors::{CodecError, CodecResult};

const SIGN_MASK: u64 = 0x8000_0000_0000_0000;
const MAX_VARINT_LEN: usize = 10;

/// Appends `v` in comparable form: sign bit flipped, big-endian.
pub fn encode_int(buf: &mut Vec<u8>, v: i64) {
    buf.extend_from_slice(&((v as u64) ^ SIGN_MASK).to_be_bytes());
}

/// Decodes a comparable i64, returning `(bytes_consumed, value)`.
pub fn decode_int(b: &[u8]) -> CodecResult<(usize, i64)> {
    let u = read_u64(b)?;
    Ok((8, (u ^ SIGN_MASK) as i64))
}

/// Appends `v` as 8 big-endian bytes.
pub fn encode_uint(buf: &mut Vec<u8>, v: u64) {
    buf.extend_from_slice(&v.to_be_bytes());
}

pub fn decode_uint(b: &[u8]) -> CodecResult<(usize, u64)> {
    Ok((8, read_u64(b)?))
}

/// Appends `v` so that byte order matches float order.
pub fn encode_float(buf: &mut Vec<u8>, v: f64) {
    let bits = v.to_bits();
    let u = if v >= 0.0 { bits | SIGN_MASK } else { !bits };
    encode_uint(buf, u);
}

pub fn decode_float(b: &[u8]) -> CodecResult<(usize, f64)> {
    let u = read_u64(b)?;
    let bits = if u & SIGN_MASK > 0 { u & !SIGN_MASK } else { !u };
    Ok((8, f64::from_bits(bits)))
}

/// Appends `v` as a LEB128 varint.
pub fn encode_uvarint(buf: &mut Vec<u8>, mut v: u64) {
    while v >= 0x80 {
        buf.push((v as u8) | 0x80);
        v >>= 7;
    }
    buf.push(v as u8);
}

pub fn decode_uvarint(b: &[u8]) -> CodecResult<(usize, u64)> {
    let mut x: u64 = 0;
    let mut shift = 0u32;
    for (i, &byte) in b.iter().enumerate() {
        if i == MAX_VARINT_LEN || (i == MAX_VARINT_LEN - 1 && byte > 1) {
            return Err(CodecError::VarintOverflow);
        }
        if byte < 0x80 {
            return Ok((i + 1, x | (u64::from(byte) << shift)));
        }
        x |= u64::from(byte & 0x7f) << shift;
        shift += 7;
    }
    Err(CodecError::truncated(b.len() + 1, b.len()))
}

/// Appends `v` as a zigzag varint.
pub fn encode_varint(buf: &mut Vec<u8>, v: i64) {
    encode_uvarint(buf, ((v << 1) ^ (v >> 63)) as u64);
}

pub fn decode_varint(b: &[u8]) -> CodecResult<(usize, i64)> {
    let (n, ux) = decode_uvarint(b)?;
    let x = (ux >> 1) as i64;
    Ok((n, if ux & 1 != 0 { !x } else { x }))
}

fn read_u64(b: &[u8]) -> CodecResult<u64> {
    let bytes: [u8; 8] = b
        .get(..8)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| CodecError::truncated(8, b.len()))?;
    Ok(u64::from_be_bytes(bytes))
}
