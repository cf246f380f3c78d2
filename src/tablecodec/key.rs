//! Record and index key encoding

use crate::codec::{decode_int, encode_int, CodecError, CodecResult};
use crate::kv;
use crate::tipb;

const TABLE_PREFIX: &[u8] = b"t";
const RECORD_PREFIX_SEP: &[u8] = b"_r";
const INDEX_PREFIX_SEP: &[u8] = b"_i";

/// Length of `t{table_id}_r`
const RECORD_PREFIX_LEN: usize = 1 + 8 + 2;

/// Returns `t{table_id}_r`.
pub fn table_record_prefix(table_id: i64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(RECORD_PREFIX_LEN);
    buf.extend_from_slice(TABLE_PREFIX);
    encode_int(&mut buf, table_id);
    buf.extend_from_slice(RECORD_PREFIX_SEP);
    buf
}

/// Returns `t{table_id}_i{index_id}`.
pub fn index_prefix(table_id: i64, index_id: i64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(RECORD_PREFIX_LEN + 8);
    buf.extend_from_slice(TABLE_PREFIX);
    encode_int(&mut buf, table_id);
    buf.extend_from_slice(INDEX_PREFIX_SEP);
    encode_int(&mut buf, index_id);
    buf
}

/// Encodes a row handle in key form.
pub fn encode_handle(handle: i64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(8);
    encode_int(&mut buf, handle);
    buf
}

/// Logical range over handles `[low, high)`.
pub fn handle_range(low: i64, high: i64) -> tipb::KeyRange {
    tipb::KeyRange::new(encode_handle(low), encode_handle(high))
}

pub fn encode_row_key(table_id: i64, handle: i64) -> Vec<u8> {
    let mut key = table_record_prefix(table_id);
    encode_int(&mut key, handle);
    key
}

pub fn encode_index_seek_key(table_id: i64, index_id: i64, encoded_values: &[u8]) -> Vec<u8> {
    let mut key = index_prefix(table_id, index_id);
    key.extend_from_slice(encoded_values);
    key
}

/// Splits a record key into `(table_id, handle)`.
pub fn decode_row_key(key: &[u8]) -> CodecResult<(i64, i64)> {
    if key.len() < RECORD_PREFIX_LEN + 8 {
        return Err(CodecError::truncated(RECORD_PREFIX_LEN + 8, key.len()));
    }
    if !key.starts_with(TABLE_PREFIX) {
        return Err(CodecError::InvalidFlag(key[0]));
    }
    let (_, table_id) = decode_int(&key[1..])?;
    if &key[9..RECORD_PREFIX_LEN] != RECORD_PREFIX_SEP {
        return Err(CodecError::InvalidFlag(key[9]));
    }
    let (_, handle) = decode_int(&key[RECORD_PREFIX_LEN..])?;
    Ok((table_id, handle))
}

/// Encodes logical table ranges and points into raw record-key ranges.
///
/// Ranges come first, in input order, followed by one single-key range per
/// point.
pub fn encode_table_ranges(
    table_id: i64,
    ranges: &[tipb::KeyRange],
    points: &[Vec<u8>],
) -> Vec<kv::KeyRange> {
    encode_ranges(&table_record_prefix(table_id), ranges, points)
}

/// Encodes logical index ranges and points into raw index-key ranges.
pub fn encode_index_ranges(
    table_id: i64,
    index_id: i64,
    ranges: &[tipb::KeyRange],
    points: &[Vec<u8>],
) -> Vec<kv::KeyRange> {
    encode_ranges(&index_prefix(table_id, index_id), ranges, points)
}

fn encode_ranges(
    prefix: &[u8],
    ranges: &[tipb::KeyRange],
    points: &[Vec<u8>],
) -> Vec<kv::KeyRange> {
    let prefixed = |suffix: &[u8]| {
        let mut key = Vec::with_capacity(prefix.len() + suffix.len() + 1);
        key.extend_from_slice(prefix);
        key.extend_from_slice(suffix);
        key
    };

    let mut out = Vec::with_capacity(ranges.len() + points.len());
    for r in ranges {
        out.push(kv::KeyRange::new(prefixed(&r.low), prefixed(&r.high)));
    }
    for p in points {
        let start = prefixed(p);
        // Smallest key strictly greater than the point.
        let mut end = start.clone();
        end.push(0);
        out.push(kv::KeyRange::new(start, end));
    }
    out
}
