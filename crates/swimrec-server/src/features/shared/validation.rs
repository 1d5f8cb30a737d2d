//! Shared validation utilities
//!
//! Request bodies arrive as loose JSON objects; these helpers pull typed
//! values out of them and produce the field-level messages returned to
//! clients.
//!
//! # Examples
//!
//! ```rust,ignore
//! use swimrec_server::features::shared::validation::required_text;
//!
//! let stroke = required_text(&body, "stroke")?;
//! ```

use serde_json::{Map, Value};
use thiserror::Error;

/// A JSON request body
pub type JsonObject = Map<String, Value>;

/// Errors that can occur while validating a single body field
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Field '{0}' is required and must be not empty")]
    Required(&'static str),

    #[error("Field '{field}' must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// Parse a request body into a JSON object
///
/// An empty body or a JSON value that is not an object yields an empty
/// object; the caller decides whether that is acceptable.
pub fn parse_body(bytes: &[u8]) -> Result<JsonObject, serde_json::Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(JsonObject::new());
    }

    match serde_json::from_slice(bytes)? {
        Value::Object(map) => Ok(map),
        _ => Ok(JsonObject::new()),
    }
}

/// True when `value` contains something other than whitespace
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Text that must be present and non-blank
pub fn required_text(body: &JsonObject, field: &'static str) -> Result<String, FieldError> {
    match body.get(field) {
        Some(Value::String(s)) if is_present(s) => Ok(s.clone()),
        _ => Err(FieldError::Required(field)),
    }
}

/// Text that may be absent; when present it must be non-blank
pub fn optional_text(body: &JsonObject, field: &'static str) -> Result<Option<String>, FieldError> {
    match body.get(field) {
        None => Ok(None),
        Some(_) => required_text(body, field).map(Some),
    }
}

/// Text that may be absent; blank strings are treated as absent
pub fn lenient_text(body: &JsonObject, field: &'static str) -> Result<Option<String>, FieldError> {
    match body.get(field) {
        None => Ok(None),
        Some(Value::String(s)) if !is_present(s) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(FieldError::WrongType {
            field,
            expected: "string",
        }),
    }
}

/// Boolean that may be absent
pub fn optional_bool(body: &JsonObject, field: &'static str) -> Result<Option<bool>, FieldError> {
    match body.get(field) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(FieldError::WrongType {
            field,
            expected: "boolean",
        }),
    }
}
