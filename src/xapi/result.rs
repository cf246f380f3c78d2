//! Select result stream and per-chunk row decoding
//!
//! A `SelectResult` hands out one `SubResult` per raw response unit. A
//! `SubResult` reads and parses its unit on the first `next()` call, releases
//! the byte stream straight after the read, and then decodes rows one at a
//! time by cursor. Only the chunk being consumed holds a parsed message.
//!
//! Both levels signal end of data with `Ok(None)`; errors are always real
//! failures.

use std::io::Read;
use std::sync::Arc;

use super::errors::{XapiError, XapiErrorCode, XapiResult};
use crate::codec;
use crate::kv::{Response, ResponseData};
use crate::observability::{log_event_with_fields, Event, ScanMetrics};
use crate::tablecodec;
use crate::tipb::{self, SelectResponse};
use crate::types::{Datum, FieldType};

/// One decoded row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub handle: i64,
    pub values: Vec<Datum>,
}

/// Streamed result of one select request.
///
/// Dropping the result closes the transport response if `close` was not
/// called.
pub struct SelectResult {
    resp: Box<dyn Response>,
    fields: Arc<[FieldType]>,
    scan_id: Arc<str>,
    metrics: Arc<ScanMetrics>,
    chunks: u64,
    exhausted: bool,
    closed: bool,
}

impl SelectResult {
    pub(crate) fn new(
        resp: Box<dyn Response>,
        fields: Arc<[FieldType]>,
        scan_id: String,
        metrics: Arc<ScanMetrics>,
    ) -> Self {
        Self {
            resp,
            fields,
            scan_id: scan_id.into(),
            metrics,
            chunks: 0,
            exhausted: false,
            closed: false,
        }
    }

    /// Fetches the next chunk.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(chunk))` for each raw response unit
    /// - `Ok(None)` once the transport is exhausted, and on every call after
    /// - `Err(AERO_XAPI_TRANSPORT)` if the transport fails
    pub fn next(&mut self) -> XapiResult<Option<SubResult>> {
        if self.exhausted {
            return Ok(None);
        }

        match self.resp.next() {
            Ok(Some(reader)) => {
                let chunk = self.chunks;
                self.chunks += 1;
                self.metrics.increment_chunks_fetched();
                let chunk_str = chunk.to_string();
                log_event_with_fields(
                    Event::ChunkFetched,
                    &[("chunk", chunk_str.as_str()), ("scan_id", &*self.scan_id)],
                );
                Ok(Some(SubResult::new(
                    reader,
                    Arc::clone(&self.fields),
                    Arc::clone(&self.scan_id),
                    chunk,
                    Arc::clone(&self.metrics),
                )))
            }
            Ok(None) => {
                self.exhausted = true;
                let chunks = self.chunks.to_string();
                log_event_with_fields(
                    Event::StreamExhausted,
                    &[("chunks", chunks.as_str()), ("scan_id", &*self.scan_id)],
                );
                Ok(None)
            }
            Err(source) => {
                self.metrics.increment_transport_failures();
                let message = source.to_string();
                log_event_with_fields(
                    Event::TransportFailed,
                    &[("error", message.as_str()), ("scan_id", &*self.scan_id)],
                );
                Err(XapiError::Transport {
                    context: format!("fetch chunk {} of scan {}", self.chunks, self.scan_id),
                    source: Some(source),
                })
            }
        }
    }

    /// Releases the transport response.
    pub fn close(mut self) -> XapiResult<()> {
        self.closed = true;
        let result = self.resp.close();
        log_event_with_fields(Event::StreamClosed, &[("scan_id", &*self.scan_id)]);
        result.map_err(|source| XapiError::Transport {
            context: format!("close scan {}", self.scan_id),
            source: Some(source),
        })
    }

    /// Consumes the stream as a flat iterator of rows across all chunks.
    pub fn into_rows(self) -> SelectRows {
        SelectRows {
            result: self,
            current: None,
            done: false,
        }
    }

    /// Field types shared by every chunk
    pub fn fields(&self) -> &[FieldType] {
        &self.fields
    }

    pub fn scan_id(&self) -> &str {
        &self.scan_id
    }

    pub fn metrics(&self) -> &Arc<ScanMetrics> {
        &self.metrics
    }

    /// Chunks handed out so far
    pub fn chunks_fetched(&self) -> u64 {
        self.chunks
    }
}

impl Drop for SelectResult {
    fn drop(&mut self) {
        if !self.closed {
            // Dropping is the cancellation path; a close failure has no one
            // to report to.
            let _ = self.resp.close();
        }
    }
}

enum ChunkState {
    /// Raw unit not read yet
    Unparsed(ResponseData),
    /// Message parsed; `cursor` is the next row to decode
    Parsed { rows: Vec<tipb::Row>, cursor: usize },
    /// An earlier call failed; the chunk yields nothing more
    Failed(XapiErrorCode),
}

/// Rows of one response chunk.
pub struct SubResult {
    state: ChunkState,
    fields: Arc<[FieldType]>,
    scan_id: Arc<str>,
    chunk: u64,
    metrics: Arc<ScanMetrics>,
    exhausted_logged: bool,
}

impl SubResult {
    fn new(
        reader: ResponseData,
        fields: Arc<[FieldType]>,
        scan_id: Arc<str>,
        chunk: u64,
        metrics: Arc<ScanMetrics>,
    ) -> Self {
        Self {
            state: ChunkState::Unparsed(reader),
            fields,
            scan_id,
            chunk,
            metrics,
            exhausted_logged: false,
        }
    }

    /// Decodes the next row of this chunk.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(row))` for each row, in message order
    /// - `Ok(None)` once every row was returned, and on every call after
    /// - `Err(..)` if the chunk cannot be read, parsed or decoded; the chunk
    ///   then fails every later call with `AERO_XAPI_CHUNK_POISONED`
    pub fn next(&mut self) -> XapiResult<Option<Row>> {
        if let ChunkState::Unparsed(_) = self.state {
            self.parse()?;
        }

        let step = match &mut self.state {
            ChunkState::Parsed { rows, cursor } => match rows.get(*cursor) {
                None => None,
                Some(raw) => {
                    let decoded = decode_row(raw, &self.fields, *cursor);
                    if decoded.is_ok() {
                        *cursor += 1;
                    }
                    Some(decoded)
                }
            },
            ChunkState::Failed(code) => return Err(XapiError::ChunkPoisoned(*code)),
            // parse() always leaves the chunk parsed or failed
            ChunkState::Unparsed(_) => {
                return Err(XapiError::ChunkPoisoned(
                    XapiErrorCode::AeroXapiMalformedStream,
                ))
            }
        };

        match step {
            Some(Ok(row)) => {
                self.metrics.increment_rows_decoded();
                Ok(Some(row))
            }
            Some(Err(e)) => {
                self.fail(&e);
                Err(e)
            }
            None => {
                if !self.exhausted_logged {
                    self.exhausted_logged = true;
                    let chunk = self.chunk.to_string();
                    log_event_with_fields(
                        Event::ChunkExhausted,
                        &[("chunk", chunk.as_str()), ("scan_id", &*self.scan_id)],
                    );
                }
                Ok(None)
            }
        }
    }

    /// No-op: the byte stream is released as soon as it has been read.
    pub fn close(&mut self) -> XapiResult<()> {
        Ok(())
    }

    /// Consumes the chunk as an iterator of rows.
    ///
    /// The iterator ends after the last row or after the first error.
    pub fn into_rows(self) -> ChunkRows {
        ChunkRows {
            chunk: self,
            done: false,
        }
    }

    /// Position of this chunk in its stream, starting at 0
    pub fn chunk_index(&self) -> u64 {
        self.chunk
    }

    /// Whether the raw unit has been read and parsed
    pub fn is_parsed(&self) -> bool {
        matches!(self.state, ChunkState::Parsed { .. })
    }

    /// Rows in the parsed message, `None` before the first `next()`
    pub fn row_count(&self) -> Option<usize> {
        match &self.state {
            ChunkState::Parsed { rows, .. } => Some(rows.len()),
            _ => None,
        }
    }

    fn parse(&mut self) -> XapiResult<()> {
        let placeholder = ChunkState::Failed(XapiErrorCode::AeroXapiMalformedStream);
        let reader = match std::mem::replace(&mut self.state, placeholder) {
            ChunkState::Unparsed(reader) => reader,
            other => {
                self.state = other;
                return Ok(());
            }
        };

        match read_message(reader, &self.metrics) {
            Ok(rows) => {
                let row_count = rows.len().to_string();
                let chunk = self.chunk.to_string();
                log_event_with_fields(
                    Event::ChunkParsed,
                    &[
                        ("chunk", chunk.as_str()),
                        ("rows", row_count.as_str()),
                        ("scan_id", &*self.scan_id),
                    ],
                );
                self.state = ChunkState::Parsed { rows, cursor: 0 };
                Ok(())
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    fn fail(&mut self, err: &XapiError) {
        self.state = ChunkState::Failed(err.code());
        self.metrics.increment_decode_failures();
        let chunk = self.chunk.to_string();
        let message = err.to_string();
        log_event_with_fields(
            Event::ChunkFailed,
            &[
                ("chunk", chunk.as_str()),
                ("code", err.code().code()),
                ("error", message.as_str()),
                ("scan_id", &*self.scan_id),
            ],
        );
    }
}

/// Drains `reader`, releases it, then parses the bytes.
fn read_message(mut reader: ResponseData, metrics: &ScanMetrics) -> XapiResult<Vec<tipb::Row>> {
    let mut data = Vec::new();
    let read = reader.read_to_end(&mut data);
    drop(reader);

    read.map_err(|source| XapiError::MalformedStream {
        context: "read response chunk".to_string(),
        source,
    })?;
    metrics.add_chunk_bytes(data.len() as u64);

    let resp: SelectResponse =
        tipb::unmarshal(&data).map_err(|source| XapiError::MalformedMessage {
            context: format!("unmarshal {} byte response", data.len()),
            source,
        })?;

    if let Some(err) = resp.error {
        return Err(XapiError::Remote {
            code: err.code,
            msg: err.msg,
        });
    }
    Ok(resp.rows)
}

fn decode_row(raw: &tipb::Row, fields: &[FieldType], index: usize) -> XapiResult<Row> {
    let values = tablecodec::decode_values(&raw.data, fields)
        .map_err(|source| XapiError::ValueDecode { row: index, source })?;
    let (_, handle) = codec::decode_int(&raw.handle)
        .map_err(|source| XapiError::HandleDecode { row: index, source })?;
    Ok(Row { handle, values })
}

/// Iterator over the rows of one chunk.
pub struct ChunkRows {
    chunk: SubResult,
    done: bool,
}

impl Iterator for ChunkRows {
    type Item = XapiResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.chunk.next() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for ChunkRows {}

/// Iterator over every row of a select result, one chunk at a time.
///
/// A chunk is dropped before the next one is fetched.
pub struct SelectRows {
    result: SelectResult,
    current: Option<SubResult>,
    done: bool,
}

impl SelectRows {
    /// Stops iteration and releases the transport response.
    pub fn close(self) -> XapiResult<()> {
        self.result.close()
    }
}

impl Iterator for SelectRows {
    type Item = XapiResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            if let Some(chunk) = self.current.as_mut() {
                match chunk.next() {
                    Ok(Some(row)) => return Some(Ok(row)),
                    Ok(None) => self.current = None,
                    Err(e) => {
                        self.done = true;
                        self.current = None;
                        return Some(Err(e));
                    }
                }
            }
            match self.result.next() {
                Ok(Some(chunk)) => self.current = Some(chunk),
                Ok(None) => self.done = true,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

impl std::iter::FusedIterator for SelectRows {}
