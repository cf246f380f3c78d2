//! Select path counters
//!
//! - Counters only, monotonic
//! - Relaxed atomics: the counters order nothing, they only count

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for one or more select streams
#[derive(Debug, Default)]
pub struct ScanMetrics {
    requests_composed: AtomicU64,
    requests_rejected: AtomicU64,
    chunks_fetched: AtomicU64,
    chunk_bytes_read: AtomicU64,
    rows_decoded: AtomicU64,
    decode_failures: AtomicU64,
    transport_failures: AtomicU64,
}

impl ScanMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_requests_composed(&self) {
        self.requests_composed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_requests_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_chunks_fetched(&self) {
        self.chunks_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_chunk_bytes(&self, bytes: u64) {
        self.chunk_bytes_read.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn increment_rows_decoded(&self) {
        self.rows_decoded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_decode_failures(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_transport_failures(&self) {
        self.transport_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Rows decoded so far
    pub fn rows_decoded(&self) -> u64 {
        self.rows_decoded.load(Ordering::Relaxed)
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> ScanMetricsSnapshot {
        ScanMetricsSnapshot {
            requests_composed: self.requests_composed.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            chunks_fetched: self.chunks_fetched.load(Ordering::Relaxed),
            chunk_bytes_read: self.chunk_bytes_read.load(Ordering::Relaxed),
            rows_decoded: self.rows_decoded.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            transport_failures: self.transport_failures.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanMetricsSnapshot {
    pub requests_composed: u64,
    pub requests_rejected: u64,
    pub chunks_fetched: u64,
    pub chunk_bytes_read: u64,
    pub rows_decoded: u64,
    pub decode_failures: u64,
    pub transport_failures: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_is_zero() {
        assert_eq!(ScanMetrics::new().snapshot(), ScanMetricsSnapshot::default());
    }

    #[test]
    fn test_counters_accumulate() {
        let m = ScanMetrics::new();
        m.increment_chunks_fetched();
        m.increment_chunks_fetched();
        m.add_chunk_bytes(100);
        m.add_chunk_bytes(28);
        m.increment_rows_decoded();

        let snap = m.snapshot();
        assert_eq!(snap.chunks_fetched, 2);
        assert_eq!(snap.chunk_bytes_read, 128);
        assert_eq!(snap.rows_decoded, 1);
        assert_eq!(m.rows_decoded(), 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let m = ScanMetrics::new();
        m.increment_decode_failures();
        let json = serde_json::to_value(m.snapshot()).unwrap();
        assert_eq!(json["decode_failures"], 1);
    }
}
