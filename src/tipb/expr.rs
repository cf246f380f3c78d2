//! Pushdown expression tree

use serde::{Deserialize, Serialize};

/// Expression node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprType {
    Null,
    Int64,
    Uint64,
    Float64,
    String,
    Bytes,
    ColumnRef,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Not,
    Like,
    In,
}

/// Expression node: literal value bytes or operator with children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expr {
    pub tp: ExprType,
    #[serde(default)]
    pub val: Vec<u8>,
    #[serde(default)]
    pub children: Vec<Expr>,
}

impl Expr {
    pub fn leaf(tp: ExprType, val: impl Into<Vec<u8>>) -> Self {
        Self {
            tp,
            val: val.into(),
            children: Vec::new(),
        }
    }

    pub fn op(tp: ExprType, children: Vec<Expr>) -> Self {
        Self {
            tp,
            val: Vec::new(),
            children,
        }
    }
}
