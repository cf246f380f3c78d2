//! CLI command implementations

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_json;
use crate::codec;
use crate::tablecodec;
use crate::tipb::SelectRequest;
use crate::types::FieldType;
use crate::xapi::{compose_request, SelectConfig};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Compose { request, config } => compose(&request, config.as_deref()),
        Command::Decode {
            fields,
            data,
            handle,
        } => decode(&fields, &data, handle.as_deref()),
    }
}

/// Print the physical request for the logical request in `request_path`
pub fn compose(request_path: &Path, config_path: Option<&Path>) -> CliResult<()> {
    let config = match config_path {
        Some(path) => SelectConfig::load(path)?,
        None => SelectConfig::default(),
    };
    config.apply_logging()?;

    let json = fs::read_to_string(request_path).map_err(|e| {
        CliError::config_error(format!(
            "failed to read request file {}: {}",
            request_path.display(),
            e
        ))
    })?;
    let req: SelectRequest = serde_json::from_str(&json)
        .map_err(|e| CliError::config_error(format!("failed to parse request: {}", e)))?;

    write_json(&compose_summary(&req, &config)?)
}

/// JSON summary of the physical request `req` maps to
pub fn compose_summary(req: &SelectRequest, config: &SelectConfig) -> CliResult<Value> {
    if req.table_info.is_none() && req.index_info.is_none() {
        return Err(CliError::invalid_argument(
            "request needs table_info or index_info",
        ));
    }

    let mut kv_req = compose_request(req, config.concurrency)?;
    kv_req.keep_order = config.keep_order;

    let ranges: Vec<Value> = kv_req
        .key_ranges
        .iter()
        .map(|r| {
            json!({
                "start": STANDARD.encode(&r.start_key),
                "end": STANDARD.encode(&r.end_key),
            })
        })
        .collect();

    Ok(json!({
        "type": kv_req.tp,
        "concurrency": kv_req.concurrency,
        "keep_order": kv_req.keep_order,
        "desc": kv_req.desc,
        "key_ranges": ranges,
        "payload_bytes": kv_req.data.len(),
    }))
}

/// Print the decoded values of one encoded row
pub fn decode(fields: &str, data: &str, handle: Option<&str>) -> CliResult<()> {
    write_json(&decode_row_json(fields, data, handle)?)
}

/// Decode a base64 row against comma separated field types
pub fn decode_row_json(fields: &str, data: &str, handle: Option<&str>) -> CliResult<Value> {
    let fields = fields
        .split(',')
        .filter(|f| !f.trim().is_empty())
        .map(|f| f.parse::<FieldType>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(CliError::invalid_argument)?;

    let data = decode_base64("data", data)?;
    let values = tablecodec::decode_values(&data, &fields)
        .map_err(|e| CliError::invalid_argument(format!("failed to decode values: {}", e)))?;

    let mut out = json!({ "values": values });
    if let Some(handle) = handle {
        let bytes = decode_base64("handle", handle)?;
        let (_, handle) = codec::decode_int(&bytes)
            .map_err(|e| CliError::invalid_argument(format!("failed to decode handle: {}", e)))?;
        out["handle"] = json!(handle);
    }
    Ok(out)
}

fn decode_base64(name: &str, input: &str) -> CliResult<Vec<u8>> {
    STANDARD
        .decode(input.trim())
        .map_err(|e| CliError::invalid_argument(format!("invalid base64 in {}: {}", name, e)))
}
