//! Select entry points and request composition

use std::sync::Arc;

use uuid::Uuid;

use super::config::SelectConfig;
use super::errors::{XapiError, XapiResult};
use super::result::SelectResult;
use crate::kv::{self, Client, ReqType};
use crate::observability::{log_event_with_fields, Event, ScanMetrics};
use crate::tablecodec;
use crate::tipb::{self, SelectRequest};
use crate::types::FieldType;

/// Sends a select request and returns its result stream.
pub fn select<C>(client: &C, req: &SelectRequest, concurrency: usize) -> XapiResult<SelectResult>
where
    C: Client + ?Sized,
{
    select_with_config(
        client,
        req,
        &SelectConfig::with_concurrency(concurrency),
        Arc::new(ScanMetrics::new()),
    )
}

/// Sends a select request using `config`, counting into `metrics`.
///
/// # Panics
///
/// Panics if the request has neither table nor index info.
pub fn select_with_config<C>(
    client: &C,
    req: &SelectRequest,
    config: &SelectConfig,
    metrics: Arc<ScanMetrics>,
) -> XapiResult<SelectResult>
where
    C: Client + ?Sized,
{
    let scan_id = Uuid::new_v4().to_string();
    let ranges = (req.ranges.len() + req.points.len()).to_string();
    log_event_with_fields(
        Event::SelectStart,
        &[("scan_id", scan_id.as_str()), ("ranges", ranges.as_str())],
    );

    let mut kv_req = match compose_request(req, config.concurrency) {
        Ok(kv_req) => kv_req,
        Err(e) => {
            reject(&metrics, &scan_id, &e);
            return Err(e);
        }
    };
    kv_req.keep_order = config.keep_order;
    metrics.increment_requests_composed();

    let tp = kv_req.tp;
    let resp = match client.send(kv_req) {
        Some(resp) => resp,
        None => {
            let e = XapiError::no_response("client returned nil response");
            reject(&metrics, &scan_id, &e);
            return Err(e);
        }
    };

    let fields: Arc<[FieldType]> = tablecodec::columns_to_field_types(req.columns()).into();
    let field_count = fields.len().to_string();
    log_event_with_fields(
        Event::SelectDispatched,
        &[
            ("scan_id", scan_id.as_str()),
            ("type", tp.as_str()),
            ("fields", field_count.as_str()),
        ],
    );

    Ok(SelectResult::new(resp, fields, scan_id, metrics))
}

fn reject(metrics: &ScanMetrics, scan_id: &str, err: &XapiError) {
    metrics.increment_requests_rejected();
    let message = err.to_string();
    log_event_with_fields(
        Event::SelectRejected,
        &[
            ("scan_id", scan_id),
            ("code", err.code().code()),
            ("error", message.as_str()),
        ],
    );
}

/// Converts a logical select request into a physical transport request.
///
/// Index scans are keyed by the index info's table and index ids; table
/// scans by the table info's table id. The full logical request travels in
/// the payload so the server can re-derive the scan.
///
/// # Panics
///
/// Panics if the request has neither table nor index info.
pub fn compose_request(req: &SelectRequest, concurrency: usize) -> XapiResult<kv::Request> {
    let (tp, key_ranges) = match (&req.index_info, &req.table_info) {
        (Some(index), _) => (
            ReqType::Index,
            tablecodec::encode_index_ranges(index.table_id, index.index_id, &req.ranges, &req.points),
        ),
        (None, Some(table)) => (
            ReqType::Select,
            tablecodec::encode_table_ranges(table.table_id, &req.ranges, &req.points),
        ),
        (None, None) => panic!("select request has neither table nor index info"),
    };

    let data = tipb::marshal(req).map_err(|source| XapiError::Serialization {
        context: format!("marshal {} request", tp),
        source,
    })?;

    Ok(kv::Request {
        tp,
        data,
        key_ranges,
        keep_order: false,
        desc: req.desc,
        concurrency,
    })
}
