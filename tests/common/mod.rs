//! In-memory transport doubles for select path tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use aerodb_xapi::kv::{self, Client, KvError, KvResult, ReqType, Response, ResponseData};
use aerodb_xapi::tablecodec;
use aerodb_xapi::tipb::{self, ColumnInfo, SelectRequest, SelectResponse, TableInfo};
use aerodb_xapi::types::{Datum, FieldType};

// =============================================================================
// Resource accounting
// =============================================================================

/// Counts raw response units that are alive (created, not yet dropped).
#[derive(Debug, Default)]
pub struct Tracker {
    live: AtomicUsize,
    max_live: AtomicUsize,
    released: AtomicUsize,
    fetches: AtomicUsize,
    closes: AtomicUsize,
}

impl Tracker {
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn max_live(&self) -> usize {
        self.max_live.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// Calls to `Response::next`
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Calls to `Response::close`
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    fn acquire(&self) {
        let live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_live.fetch_max(live, Ordering::SeqCst);
    }

    fn release(&self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Byte stream that reports its lifetime to a `Tracker`.
pub struct TrackedReader {
    inner: Cursor<Vec<u8>>,
    fail_read: bool,
    tracker: Arc<Tracker>,
}

impl TrackedReader {
    fn new(bytes: Vec<u8>, fail_read: bool, tracker: Arc<Tracker>) -> Self {
        tracker.acquire();
        Self {
            inner: Cursor::new(bytes),
            fail_read,
            tracker,
        }
    }
}

impl Read for TrackedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.fail_read {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stream cut short",
            ));
        }
        self.inner.read(buf)
    }
}

impl Drop for TrackedReader {
    fn drop(&mut self) {
        self.tracker.release();
    }
}

// =============================================================================
// Transport doubles
// =============================================================================

/// One step of a scripted response.
#[derive(Debug, Clone)]
pub enum Step {
    /// Raw unit holding these bytes
    Chunk(Vec<u8>),
    /// Raw unit whose read fails
    BrokenChunk,
    /// Transport failure
    Fail(String),
}

impl Step {
    /// Raw unit holding `resp`
    pub fn message(resp: &SelectResponse) -> Self {
        Step::Chunk(tipb::marshal(resp).unwrap())
    }
}

pub struct MockResponse {
    steps: VecDeque<Step>,
    tracker: Arc<Tracker>,
}

impl Response for MockResponse {
    fn next(&mut self) -> KvResult<Option<ResponseData>> {
        self.tracker.fetches.fetch_add(1, Ordering::SeqCst);
        match self.steps.pop_front() {
            None => Ok(None),
            Some(Step::Chunk(bytes)) => Ok(Some(Box::new(TrackedReader::new(
                bytes,
                false,
                Arc::clone(&self.tracker),
            )))),
            Some(Step::BrokenChunk) => Ok(Some(Box::new(TrackedReader::new(
                Vec::new(),
                true,
                Arc::clone(&self.tracker),
            )))),
            Some(Step::Fail(msg)) => Err(KvError::Transport(msg)),
        }
    }

    fn close(&mut self) -> KvResult<()> {
        self.tracker.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Client that replays a fixed script, or returns no response at all.
pub struct MockClient {
    steps: Vec<Step>,
    nil_response: bool,
    pub tracker: Arc<Tracker>,
    pub sent: Mutex<Vec<kv::Request>>,
}

impl MockClient {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            nil_response: false,
            tracker: Arc::new(Tracker::default()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn nil() -> Self {
        Self {
            nil_response: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn last_request(&self) -> kv::Request {
        self.sent
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request sent")
    }
}

impl Client for MockClient {
    fn send(&self, req: kv::Request) -> Option<Box<dyn Response>> {
        self.sent.lock().unwrap().push(req);
        if self.nil_response {
            return None;
        }
        Some(Box::new(MockResponse {
            steps: self.steps.iter().cloned().collect(),
            tracker: Arc::clone(&self.tracker),
        }))
    }

    fn support_request_type(&self, tp: ReqType, _sub_type: i64) -> bool {
        matches!(tp, ReqType::Select | ReqType::Index)
    }
}

// =============================================================================
// Builders
// =============================================================================

pub fn int_columns(n: usize) -> Vec<ColumnInfo> {
    (1..=n as i64)
        .map(|id| ColumnInfo::new(id, FieldType::Int))
        .collect()
}

/// Table scan over `[low, high)` projecting `columns`.
pub fn table_scan(table_id: i64, columns: Vec<ColumnInfo>, low: i64, high: i64) -> SelectRequest {
    SelectRequest::table_scan(TableInfo { table_id, columns })
        .with_range(tablecodec::handle_range(low, high))
}

pub fn raw_row(handle: i64, values: &[Datum]) -> tipb::Row {
    tipb::Row {
        handle: tablecodec::encode_handle(handle),
        data: tablecodec::encode_values(values),
    }
}

/// Message holding one row per handle, each row `[handle, handle * 10]`.
pub fn int_message(handles: impl IntoIterator<Item = i64>) -> SelectResponse {
    SelectResponse {
        error: None,
        rows: handles
            .into_iter()
            .map(|h| raw_row(h, &[Datum::I64(h), Datum::I64(h * 10)]))
            .collect(),
    }
}
