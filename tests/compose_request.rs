//! Request Composition Tests
//!
//! Checks the mapping from logical select requests to physical requests:
//! - request kind follows the scan target, index info first
//! - raw key ranges carry the table or index prefix, ranges before points
//! - the payload decodes back to the logical request

mod common;

use std::sync::Arc;

use aerodb_xapi::codec;
use aerodb_xapi::kv::{self, ReqType};
use aerodb_xapi::observability::ScanMetrics;
use aerodb_xapi::tablecodec;
use aerodb_xapi::tipb::{
    self, ColumnInfo, Expr, ExprType, IndexInfo, KeyRange, SelectRequest, TableInfo,
};
use aerodb_xapi::types::{Datum, FieldType};
use aerodb_xapi::xapi::{self, SelectConfig};

use common::{int_columns, table_scan, MockClient};

fn index_scan(table_id: i64, index_id: i64) -> SelectRequest {
    SelectRequest::index_scan(IndexInfo {
        table_id,
        index_id,
        columns: vec![ColumnInfo::new(2, FieldType::VarChar)],
        unique: false,
    })
}

fn index_value(s: &str) -> Vec<u8> {
    codec::encode_key(&[Datum::String(s.to_string())])
}

// =============================================================================
// Request kind and key prefix
// =============================================================================

#[test]
fn test_table_scan_keys_use_record_prefix() {
    for table_id in [1i64, 42, 1 << 40] {
        let req = table_scan(table_id, int_columns(1), 10, 20);
        let kv_req = xapi::compose_request(&req, 2).unwrap();

        assert_eq!(kv_req.tp, ReqType::Select);
        assert_eq!(kv_req.key_ranges.len(), 1);
        assert_eq!(
            kv_req.key_ranges[0],
            kv::KeyRange::new(
                tablecodec::encode_row_key(table_id, 10),
                tablecodec::encode_row_key(table_id, 20),
            )
        );
    }
}

#[test]
fn test_index_scan_keys_use_index_prefix() {
    for (table_id, index_id) in [(1i64, 1i64), (9, 3), (500, 77)] {
        let req = index_scan(table_id, index_id)
            .with_range(KeyRange::new(index_value("a"), index_value("m")));
        let kv_req = xapi::compose_request(&req, 1).unwrap();

        assert_eq!(kv_req.tp, ReqType::Index);
        let prefix = tablecodec::index_prefix(table_id, index_id);
        for r in &kv_req.key_ranges {
            assert!(r.start_key.starts_with(&prefix));
            assert!(r.end_key.starts_with(&prefix));
        }
        assert_eq!(
            kv_req.key_ranges[0].start_key,
            tablecodec::encode_index_seek_key(table_id, index_id, &index_value("a"))
        );
    }
}

/// A request naming both targets is an index scan.
#[test]
fn test_index_target_preferred() {
    let mut req = index_scan(3, 4);
    req.table_info = Some(TableInfo {
        table_id: 3,
        columns: int_columns(2),
    });
    let kv_req = xapi::compose_request(&req, 1).unwrap();
    assert_eq!(kv_req.tp, ReqType::Index);
}

// =============================================================================
// Ranges and points
// =============================================================================

#[test]
fn test_points_follow_ranges() {
    let req = table_scan(5, int_columns(1), 0, 100)
        .with_range(tablecodec::handle_range(200, 300))
        .with_point(tablecodec::encode_handle(150))
        .with_point(tablecodec::encode_handle(-1));
    let kv_req = xapi::compose_request(&req, 1).unwrap();

    assert_eq!(kv_req.key_ranges.len(), 4);
    assert!(kv_req.key_ranges[0].contains(&tablecodec::encode_row_key(5, 50)));
    assert!(kv_req.key_ranges[1].contains(&tablecodec::encode_row_key(5, 250)));

    let point = &kv_req.key_ranges[2];
    assert_eq!(point.start_key, tablecodec::encode_row_key(5, 150));
    assert!(point.contains(&tablecodec::encode_row_key(5, 150)));
    assert!(!point.contains(&tablecodec::encode_row_key(5, 151)));

    assert!(kv_req.key_ranges[3].contains(&tablecodec::encode_row_key(5, -1)));
}

#[test]
fn test_handle_order_preserved_in_keys() {
    let handles = [i64::MIN, -7, 0, 1, 1 << 32, i64::MAX];
    let keys: Vec<Vec<u8>> = handles
        .iter()
        .map(|&h| tablecodec::encode_row_key(8, h))
        .collect();
    assert!(keys.windows(2).all(|w| w[0] < w[1]));

    for (key, &h) in keys.iter().zip(handles.iter()) {
        assert_eq!(tablecodec::decode_row_key(key).unwrap(), (8, h));
    }
}

#[test]
fn test_empty_request_has_no_ranges() {
    let req = SelectRequest::table_scan(TableInfo {
        table_id: 1,
        columns: int_columns(1),
    });
    let kv_req = xapi::compose_request(&req, 1).unwrap();
    assert!(kv_req.key_ranges.is_empty());
}

// =============================================================================
// Payload
// =============================================================================

#[test]
fn test_payload_carries_whole_request() {
    let mut req = index_scan(2, 6)
        .with_range(KeyRange::new(index_value("k"), index_value("p")))
        .with_point(index_value("z"));
    req.start_ts = 4_000_000;
    req.limit = Some(25);
    req.desc = true;
    req.where_expr = Some(Expr::op(
        ExprType::Eq,
        vec![
            Expr::leaf(ExprType::ColumnRef, codec::encode_key(&[Datum::I64(2)])),
            Expr::leaf(ExprType::String, "k"),
        ],
    ));

    let kv_req = xapi::compose_request(&req, 3).unwrap();
    assert!(kv_req.desc);
    assert_eq!(kv_req.concurrency, 3);

    let decoded: SelectRequest = tipb::unmarshal(&kv_req.data).unwrap();
    assert_eq!(decoded, req);
}

#[test]
fn test_payload_rejects_trailing_bytes() {
    let req = table_scan(1, int_columns(1), 0, 1);
    let mut data = xapi::compose_request(&req, 1).unwrap().data;
    data.push(0);
    assert!(tipb::unmarshal::<SelectRequest>(&data).is_err());
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn test_select_sends_composed_request() {
    let client = MockClient::new(vec![]);
    let req = table_scan(11, int_columns(3), 1, 2);

    let result = xapi::select(&client, &req, 7).unwrap();
    assert_eq!(result.fields().len(), 3);
    assert_eq!(client.last_request(), xapi::compose_request(&req, 7).unwrap());
}

#[test]
fn test_select_with_config_counts_request() {
    let client = MockClient::new(vec![]);
    let metrics = Arc::new(ScanMetrics::new());
    let req = index_scan(2, 1).with_point(index_value("x"));
    let config = SelectConfig {
        keep_order: true,
        ..SelectConfig::with_concurrency(1)
    };

    let result = xapi::select_with_config(&client, &req, &config, Arc::clone(&metrics)).unwrap();
    assert_eq!(result.fields(), &[FieldType::VarChar]);
    assert_eq!(client.last_request().tp, ReqType::Index);
    assert!(client.last_request().keep_order);
    assert_eq!(metrics.snapshot().requests_composed, 1);
}

#[test]
fn test_no_filter_is_pushed_down() {
    let client = MockClient::new(vec![]);
    let expr = Expr::op(
        ExprType::Gt,
        vec![
            Expr::leaf(ExprType::ColumnRef, vec![1u8]),
            Expr::leaf(ExprType::Int64, 5i64.to_be_bytes().to_vec()),
        ],
    );
    assert!(!xapi::support_expression(&client, &expr));
    assert!(!xapi::support_expression(&client, &Expr::leaf(ExprType::Null, Vec::<u8>::new())));
}
