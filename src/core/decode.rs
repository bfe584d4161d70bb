//! Purpose: Recover raw script text from a JSON string literal or `"key": "value"` line.
//! Exports: `Decoded`, `decode`, `decode_text`, `INVALID_INPUT_MESSAGE`.
//! Role: Splits an optional key, then delegates the value to the JSON boundary.
//! Invariants: Blank input decodes to empty output without error.
//! Invariants: Failures clear output and key; no partial output is produced.
//! Invariants: A key recognized by the split is kept when the quoted fallback succeeds.
//! Invariants: Only one fallback exists: parsing the whole quoted input as a literal.
//! Notes: Non-string JSON values decode to their compact JSON text.
use serde::Serialize;
use serde_json::Value;

use crate::core::conversion::DecodeResult;
use crate::core::error::{Error, ErrorKind};
use crate::core::keyline::{split_key_value, trim_json_space};
use crate::json::parse;

pub const INVALID_INPUT_MESSAGE: &str =
    "invalid JSON string format: input must be a JSON string literal or a \"key\": \"value\" pair";

/// Serializes as the `{"output", "key"}` envelope printed by `decode --json`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Decoded {
    pub output: String,
    #[serde(rename = "key")]
    pub key_name: Option<String>,
}

pub fn decode(raw_input: &str) -> DecodeResult {
    decode_text(raw_input).into()
}

pub fn decode_text(raw_input: &str) -> Result<Decoded, Error> {
    let trimmed = trim_json_space(raw_input);
    if trimmed.is_empty() {
        return Ok(Decoded::default());
    }
    let body = trimmed.strip_suffix(',').unwrap_or(trimmed);

    let (key_name, value_text) = match split_key_value(body) {
        Some(pair) => (Some(pair.key), pair.value),
        None => (None, body),
    };

    let primary = match parse_value(value_text) {
        Ok(output) => {
            tracing::debug!(keyed = key_name.is_some(), "decoded value");
            return Ok(Decoded {
                output,
                key_name: key_name.map(str::to_string),
            });
        }
        Err(err) => err,
    };

    if trimmed.starts_with('"')
        && trimmed.ends_with('"')
        && let Ok(output) = parse_value(trimmed)
    {
        tracing::debug!(keyed = key_name.is_some(), "decoded quoted input as one literal");
        return Ok(Decoded {
            output,
            key_name: key_name.map(str::to_string),
        });
    }

    let context = if key_name.is_some() {
        "key/value line"
    } else {
        "json literal"
    };
    tracing::debug!(error = %primary, context, "decode failed");
    Err(Error::new(ErrorKind::MalformedJson)
        .with_message(INVALID_INPUT_MESSAGE)
        .with_hint(parse::hint_for_error(&primary, context))
        .with_source(primary))
}

fn parse_value(text: &str) -> Result<String, serde_json::Error> {
    let value: Value = parse::from_str(text)?;
    Ok(match value {
        Value::String(text) => text,
        other => other.to_string(),
    })
}
