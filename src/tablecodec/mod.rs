//! Table codec
//!
//! Maps the row-oriented logical model onto byte keys and values:
//!
//! ```text
//! record key:  t{table_id}_r{handle}
//! index key:   t{table_id}_i{index_id}{encoded index values}
//! ```
//!
//! Ids and handles use the comparable integer encoding so that key order
//! matches numeric order. Row values are flag-prefixed datums decoded
//! against the projected field types.

mod key;
mod values;

pub use key::{
    decode_row_key, encode_handle, encode_index_ranges, encode_index_seek_key,
    encode_row_key, encode_table_ranges, handle_range, index_prefix, table_record_prefix,
};
pub use values::{columns_to_field_types, decode_values, encode_values};
