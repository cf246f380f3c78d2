//! Byte string encodings
//!
//! Keys use the memcomparable group format: the input is split into groups
//! of eight bytes, each group is zero-padded and followed by a marker byte
//! `0xFF - pad_len`. Row values use the cheaper varint length prefix.

use super::errors::{CodecError, CodecResult};
use super::number::{decode_varint, encode_varint};

const GROUP_SIZE: usize = 8;
const MARKER: u8 = 0xFF;
const PAD: u8 = 0x00;

/// Appends `data` in memcomparable form.
pub fn encode_bytes(buf: &mut Vec<u8>, data: &[u8]) {
    let groups = data.len() / GROUP_SIZE + 1;
    buf.reserve(groups * (GROUP_SIZE + 1));
    for idx in (0..=data.len()).step_by(GROUP_SIZE) {
        let remain = data.len() - idx;
        if remain >= GROUP_SIZE {
            buf.extend_from_slice(&data[idx..idx + GROUP_SIZE]);
            buf.push(MARKER);
        } else {
            let pad_count = GROUP_SIZE - remain;
            buf.extend_from_slice(&data[idx..]);
            buf.extend(std::iter::repeat(PAD).take(pad_count));
            buf.push(MARKER - pad_count as u8);
        }
    }
}

/// Decodes a memcomparable byte string, returning `(bytes_consumed, data)`.
pub fn decode_bytes(b: &[u8]) -> CodecResult<(usize, Vec<u8>)> {
    let mut data = Vec::with_capacity(b.len());
    let mut offset = 0;
    loop {
        let group = b
            .get(offset..offset + GROUP_SIZE + 1)
            .ok_or_else(|| CodecError::truncated(offset + GROUP_SIZE + 1, b.len()))?;
        offset += GROUP_SIZE + 1;

        let marker = group[GROUP_SIZE];
        let pad_count = (MARKER - marker) as usize;
        if pad_count > GROUP_SIZE {
            return Err(CodecError::InvalidMarker(marker));
        }

        let real = GROUP_SIZE - pad_count;
        data.extend_from_slice(&group[..real]);

        if pad_count != 0 {
            if group[real..GROUP_SIZE].iter().any(|&p| p != PAD) {
                return Err(CodecError::InvalidPadding);
            }
            return Ok((offset, data));
        }
    }
}

/// Appends `data` prefixed by its length as a varint.
pub fn encode_compact_bytes(buf: &mut Vec<u8>, data: &[u8]) {
    encode_varint(buf, data.len() as i64);
    buf.extend_from_slice(data);
}

/// Decodes a length-prefixed byte string, returning `(bytes_consumed, data)`.
pub fn decode_compact_bytes(b: &[u8]) -> CodecResult<(usize, Vec<u8>)> {
    let (n, len) = decode_varint(b)?;
    if len < 0 {
        return Err(CodecError::InvalidLength(len));
    }
    let len = len as usize;
    let rest = &b[n..];
    if rest.len() < len {
        return Err(CodecError::truncated(len, rest.len()));
    }
    Ok((n + len, rest[..len].to_vec()))
}
