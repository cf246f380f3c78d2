//! Typed values for the select result path
//!
//! A `FieldType` describes how one projected column is encoded on the wire;
//! a `Datum` is one decoded column value. A row is decoded by walking the
//! field types in order, so the field type list is order-significant.

mod datum;
mod field_type;

pub use datum::Datum;
pub use field_type::FieldType;
