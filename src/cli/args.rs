//! CLI argument definitions using clap
//!
//! Commands:
//! - aerodb-xapi compose --request <path> [--config <path>]
//! - aerodb-xapi decode --fields <types> --data <base64> [--handle <base64>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect select requests and encoded rows
#[derive(Parser, Debug)]
#[command(name = "aerodb-xapi")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compose the physical request for a logical select request
    Compose {
        /// Path to the select request (JSON)
        #[arg(long)]
        request: PathBuf,

        /// Path to the select configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Decode one encoded row
    Decode {
        /// Comma separated field types, e.g. "int,varchar"
        #[arg(long)]
        fields: String,

        /// Base64 encoded column values
        #[arg(long)]
        data: String,

        /// Base64 encoded handle
        #[arg(long)]
        handle: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
