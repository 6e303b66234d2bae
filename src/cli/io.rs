//! JSON I/O handling for the host protocol
//!
//! - Input: one JSON object per line
//! - Output: one JSON object per line, `status` first
//! - UTF-8 only

use std::io::{BufRead, Write};

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};

/// Iterate JSON requests, one per non-empty line.
///
/// Lines are split on raw bytes, so a line that is not UTF-8 is a bad
/// request rather than a stream failure.
pub fn read_requests<R: BufRead>(reader: R) -> impl Iterator<Item = CliResult<Value>> {
    reader
        .split(b'\n')
        .filter(|line| {
            line.as_ref()
                .map_or(true, |l| !l.iter().all(u8::is_ascii_whitespace))
        })
        .map(|line| {
            let line = line.map_err(CliError::from)?;
            serde_json::from_slice(&line)
                .map_err(|e| CliError::bad_request(format!("Invalid request: {}", e)))
        })
}

/// Write a success response
pub fn write_response<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    let response = json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *writer, &response)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// Write an error response
pub fn write_error<W: Write>(writer: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = json!({
        "status": "error",
        "code": code,
        "message": message
    });

    serde_json::to_writer(&mut *writer, &response)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
