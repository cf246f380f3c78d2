//! aerodb-xapi - client side of the select pushdown protocol
//!
//! Turns a logical table or index scan into a physical key-range request,
//! sends it through a cluster transport, and lazily decodes the streamed
//! response chunks into typed rows.
//!
//! ```ignore
//! use aerodb_xapi::xapi;
//!
//! let mut result = xapi::select(&client, &request, 8)?;
//! while let Some(mut chunk) = result.next()? {
//!     while let Some(row) = chunk.next()? {
//!         println!("{} {:?}", row.handle, row.values);
//!     }
//! }
//! result.close()?;
//! ```

pub mod cli;
pub mod codec;
pub mod kv;
pub mod observability;
pub mod tablecodec;
pub mod tipb;
pub mod types;
pub mod xapi;
