//! JSON I/O handling for CLI
//!
//! - Input: one JSON document on stdin (may span lines)
//! - Output: one JSON object on stdout
//! - Logs go to stderr, never stdout

use std::io::{self, Read, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read a JSON document from stdin
pub fn read_request() -> CliResult<Value> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    parse_request(&input)
}

pub fn parse_request(input: &str) -> CliResult<Value> {
    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    Ok(serde_json::from_str(input)?)
}

/// Success envelope
pub fn ok_envelope(data: Value) -> Value {
    serde_json::json!({
        "status": "ok",
        "data": data
    })
}

/// Error envelope; `details` only when the error has some
pub fn error_envelope(err: &CliError) -> Value {
    let mut response = serde_json::json!({
        "status": "error",
        "code": err.code_str(),
        "message": err.message()
    });
    if let (Some(details), Value::Object(fields)) = (err.details(), &mut response) {
        fields.insert("details".to_string(), details.clone());
    }
    response
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_json(&ok_envelope(data))
}

/// Write an error response to stdout
pub fn write_error(err: &CliError) -> CliResult<()> {
    write_json(&error_envelope(err))
}

fn write_json(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multiline_request() {
        let value = parse_request("{\n  \"name\": \"Combat Customs\"\n}\n").unwrap();
        assert_eq!(value["name"], "Combat Customs");
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(parse_request("  \n").is_err());
    }

    #[test]
    fn test_error_envelope() {
        let err = CliError::unknown_model("Spaceship");
        let envelope = error_envelope(&err);
        assert_eq!(envelope["status"], "error");
        assert_eq!(envelope["code"], "UNKNOWN_MODEL");
        assert!(envelope.get("details").is_none());
    }
}
