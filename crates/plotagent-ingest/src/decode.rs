//! Structured decoding of raw model output
//!
//! Uses serde_json for the actual parsing. The only leniency is unwrapping a
//! single Markdown code fence, which chat models add around JSON even when
//! told not to.

use once_cell::sync::Lazy;
use plotagent_schema::coerce::value_kind;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::ingestor::IngestOptions;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A```[A-Za-z0-9_+-]*[ \t]*\r?\n?(.*?)\r?\n?[ \t]*```\z")
        .expect("code fence pattern is valid")
});

/// Strip one surrounding code fence, if present
///
/// Text without a fence is returned unchanged (trimmed).
#[must_use]
pub fn unwrap_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    CODE_FENCE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map_or(trimmed, |m| m.as_str().trim())
}

/// Reject text above `options.max_payload_bytes`
///
/// # Errors
/// `DecodeError::TooLarge` when over the limit
pub fn check_size(raw: &str, options: &IngestOptions) -> Result<(), DecodeError> {
    if raw.len() > options.max_payload_bytes {
        return Err(DecodeError::TooLarge {
            size: raw.len(),
            max: options.max_payload_bytes,
        });
    }
    Ok(())
}

/// Size-check, unwrap (if enabled) and trim a model response
///
/// # Errors
/// - `DecodeError::TooLarge` above `options.max_payload_bytes`
/// - `DecodeError::Empty` when nothing is left
pub fn prepare_text<'a>(raw: &'a str, options: &IngestOptions) -> Result<&'a str, DecodeError> {
    check_size(raw, options)?;

    let text = if options.unwrap_code_fences {
        unwrap_code_fence(raw)
    } else {
        raw.trim()
    };
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }
    Ok(text)
}

/// Decode raw text into a key/value mapping
///
/// # Errors
/// - `DecodeError::Empty` / `DecodeError::TooLarge`, see [`prepare_text`]
/// - `DecodeError::Malformed` for JSON syntax errors
/// - `DecodeError::NotAnObject` when the top level is not an object
pub fn decode_object(raw: &str, options: &IngestOptions) -> Result<Map<String, Value>, DecodeError> {
    let text = prepare_text(raw, options)?;

    let value: Value = serde_json::from_str(text).map_err(|e| DecodeError::malformed(&e))?;
    tracing::debug!("decoded {} payload ({} bytes)", value_kind(&value), text.len());

    match value {
        Value::Object(map) => Ok(map),
        other => Err(DecodeError::NotAnObject(value_kind(&other))),
    }
}
