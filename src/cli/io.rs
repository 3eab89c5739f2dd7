//! JSON I/O handling for CLI
//!
//! - Input: one JSON object per line on stdin
//! - Output: one JSON envelope per line on stdout
//! - Logs go to stderr and never mix with responses

use std::io::{self, BufRead, Write};

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};

/// Read one line from stdin
pub fn read_line() -> CliResult<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

/// Parse one request line; empty or malformed input is the caller's fault
pub fn parse_request(line: &str) -> CliResult<Value> {
    if line.trim().is_empty() {
        return Err(CliError::invalid_request("Empty input"));
    }

    serde_json::from_str(line).map_err(|e| CliError::invalid_request(format!("Malformed JSON: {}", e)))
}

/// Read line-delimited requests from stdin until EOF, skipping blank lines.
///
/// The outer error is fatal (stdin failed); the inner one is a bad line.
pub fn read_requests() -> impl Iterator<Item = CliResult<CliResult<Value>>> {
    let stdin = io::stdin();
    stdin.lock().lines().filter_map(|line| match line {
        Err(e) => Some(Err(CliError::from(e))),
        Ok(line) if line.trim().is_empty() => None,
        Ok(line) => Some(Ok(parse_request(&line))),
    })
}

/// Success envelope
pub fn response_envelope(data: Value) -> Value {
    json!({
        "status": "ok",
        "data": data
    })
}

/// Error envelope; `details` appears only when the error carries them
pub fn error_envelope(error: &CliError) -> Value {
    let mut response = json!({
        "status": "error",
        "code": error.code_str(),
        "message": error.message()
    });
    if let (Some(details), Some(body)) = (error.details(), response.as_object_mut()) {
        body.insert("details".to_string(), details.clone());
    }
    response
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_json(&response_envelope(data))
}

/// Write an error response to stdout
pub fn write_error(error: &CliError) -> CliResult<()> {
    write_json(&error_envelope(error))
}

/// Write one JSON value as a line to stdout
pub fn write_json(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
