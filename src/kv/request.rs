//! Physical request types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of physical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReqType {
    /// Table row scan
    Select,
    /// Index entry scan
    Index,
}

impl ReqType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReqType::Select => "select",
            ReqType::Index => "index",
        }
    }
}

impl fmt::Display for ReqType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw key range, `[start_key, end_key)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyRange {
    pub start_key: Vec<u8>,
    pub end_key: Vec<u8>,
}

impl KeyRange {
    pub fn new(start_key: Vec<u8>, end_key: Vec<u8>) -> Self {
        Self { start_key, end_key }
    }

    /// Returns true if `key` falls inside the range.
    pub fn contains(&self, key: &[u8]) -> bool {
        key >= self.start_key.as_slice() && key < self.end_key.as_slice()
    }
}

/// Physical request handed to a `Client`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub tp: ReqType,
    /// Serialized logical request
    pub data: Vec<u8>,
    pub key_ranges: Vec<KeyRange>,
    /// Chunks must arrive in key order
    pub keep_order: bool,
    pub desc: bool,
    pub concurrency: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_range_is_half_open() {
        let r = KeyRange::new(b"b".to_vec(), b"d".to_vec());
        assert!(r.contains(b"b"));
        assert!(r.contains(b"c\xff"));
        assert!(!r.contains(b"d"));
        assert!(!r.contains(b"a"));
    }
}
