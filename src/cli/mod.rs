//! CLI module
//!
//! Offline inspection of the select path:
//! - compose: print the physical request a logical request maps to
//! - decode: decode one encoded row against a list of field types

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{compose, compose_summary, decode, decode_row_json, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_json;
