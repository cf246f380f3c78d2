//! Select request and response messages

use serde::{Deserialize, Serialize};

use super::expr::Expr;
use crate::types::FieldType;

/// Column projected by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub column_id: i64,
    pub tp: FieldType,
    /// Column doubles as the row handle
    #[serde(default)]
    pub pk_handle: bool,
}

impl ColumnInfo {
    pub fn new(column_id: i64, tp: FieldType) -> Self {
        Self {
            column_id,
            tp,
            pk_handle: false,
        }
    }
}

/// Table scan target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub table_id: i64,
    pub columns: Vec<ColumnInfo>,
}

/// Index scan target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexInfo {
    pub table_id: i64,
    pub index_id: i64,
    pub columns: Vec<ColumnInfo>,
    #[serde(default)]
    pub unique: bool,
}

/// Logical key range, `[low, high)`.
///
/// Bounds are already in comparable key form (an encoded handle for table
/// scans, encoded index values for index scans) but carry no table prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRange {
    pub low: Vec<u8>,
    pub high: Vec<u8>,
}

impl KeyRange {
    pub fn new(low: impl Into<Vec<u8>>, high: impl Into<Vec<u8>>) -> Self {
        Self {
            low: low.into(),
            high: high.into(),
        }
    }
}

/// Logical scan request.
///
/// Exactly one of `table_info` and `index_info` is set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectRequest {
    #[serde(default)]
    pub start_ts: u64,
    #[serde(default)]
    pub table_info: Option<TableInfo>,
    #[serde(default)]
    pub index_info: Option<IndexInfo>,
    #[serde(default)]
    pub ranges: Vec<KeyRange>,
    #[serde(default)]
    pub points: Vec<Vec<u8>>,
    /// Filter forwarded to the server verbatim
    #[serde(default)]
    pub where_expr: Option<Expr>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub desc: bool,
}

impl SelectRequest {
    /// Table scan over the given table.
    pub fn table_scan(table_info: TableInfo) -> Self {
        Self {
            table_info: Some(table_info),
            ..Default::default()
        }
    }

    /// Index scan over the given index.
    pub fn index_scan(index_info: IndexInfo) -> Self {
        Self {
            index_info: Some(index_info),
            ..Default::default()
        }
    }

    pub fn with_range(mut self, range: KeyRange) -> Self {
        self.ranges.push(range);
        self
    }

    pub fn with_point(mut self, point: impl Into<Vec<u8>>) -> Self {
        self.points.push(point.into());
        self
    }

    /// Columns projected by the scan, in wire order.
    ///
    /// # Panics
    ///
    /// Panics if neither table nor index info is set.
    pub fn columns(&self) -> &[ColumnInfo] {
        match (&self.table_info, &self.index_info) {
            (_, Some(index)) => &index.columns,
            (Some(table), None) => &table.columns,
            (None, None) => panic!("select request has neither table nor index info"),
        }
    }
}

/// Error reported by the server for one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Error {
    pub code: i32,
    pub msg: String,
}

/// One raw result row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Row {
    /// Comparable-int encoded handle
    pub handle: Vec<u8>,
    /// Value-encoded column datums
    pub data: Vec<u8>,
}

/// One response chunk.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectResponse {
    pub error: Option<Error>,
    pub rows: Vec<Row>,
}
