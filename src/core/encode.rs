//! Purpose: Turn raw script text into a `"key": "<json literal>"` line.
//! Exports: `EncodeOptions`, `encode`, `encode_with`, `encode_line`, `escape_literal`.
//! Invariants: JSON-decoding the literal reproduces the input byte for byte.
//! Invariants: The key is inserted verbatim; a key containing `"` yields invalid JSON.
//! Invariants: At most one trailing comma is appended, regardless of the input text.
use crate::core::conversion::ConversionResult;
use crate::core::error::{Error, ErrorKind};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncodeOptions {
    pub key_name: String,
    pub add_trailing_comma: bool,
    /// Escape every non-ASCII code point as `\uXXXX` (UTF-16 units).
    pub ascii_only: bool,
}

impl EncodeOptions {
    pub fn new(key_name: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            add_trailing_comma: true,
            ascii_only: false,
        }
    }

    pub fn with_trailing_comma(mut self, add_trailing_comma: bool) -> Self {
        self.add_trailing_comma = add_trailing_comma;
        self
    }

    pub fn with_ascii_only(mut self, ascii_only: bool) -> Self {
        self.ascii_only = ascii_only;
        self
    }
}

pub fn encode(raw_input: &str, key_name: &str, add_trailing_comma: bool) -> ConversionResult {
    let options = EncodeOptions::new(key_name).with_trailing_comma(add_trailing_comma);
    encode_with(raw_input, &options)
}

pub fn encode_with(raw_input: &str, options: &EncodeOptions) -> ConversionResult {
    match encode_line(raw_input, options) {
        Ok(line) => ConversionResult::ok(line),
        Err(err) => ConversionResult::failed(err.message().unwrap_or("failed to encode string")),
    }
}

/// Empty input encodes to an empty line rather than `"key": ""`.
pub fn encode_line(raw_input: &str, options: &EncodeOptions) -> Result<String, Error> {
    if raw_input.is_empty() {
        return Ok(String::new());
    }
    let literal = escape_literal(raw_input, options.ascii_only)?;
    let mut line = String::with_capacity(options.key_name.len() + literal.len() + 5);
    line.push('"');
    line.push_str(&options.key_name);
    line.push_str("\": ");
    line.push_str(&literal);
    if options.add_trailing_comma {
        line.push(',');
    }
    tracing::debug!(
        input_len = raw_input.len(),
        output_len = line.len(),
        "encoded script"
    );
    Ok(line)
}

pub fn escape_literal(raw: &str, ascii_only: bool) -> Result<String, Error> {
    let literal = serde_json::to_string(raw).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode string")
            .with_source(err)
    })?;
    if !ascii_only || literal.is_ascii() {
        return Ok(literal);
    }
    Ok(escape_non_ascii(&literal))
}

fn escape_non_ascii(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len() + 16);
    let mut units = [0u16; 2];
    for c in literal.chars() {
        if c.is_ascii() {
            out.push(c);
            continue;
        }
        for unit in c.encode_utf16(&mut units) {
            out.push_str(&format!("\\u{unit:04x}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{EncodeOptions, encode, encode_with, escape_literal};

    #[test]
    fn multi_line_script_with_comma() {
        let result = encode("hello\nworld", "script", true);
        assert_eq!(result.output, "\"script\": \"hello\\nworld\",");
        assert_eq!(result.error, None);
    }

    #[test]
    fn empty_input_is_noop() {
        for comma in [true, false] {
            let result = encode("", "script", comma);
            assert_eq!(result.output, "");
            assert_eq!(result.error, None);
        }
    }

    #[test]
    fn trailing_comma_is_single() {
        let with = encode("a,", "k", true).output;
        assert!(with.ends_with("\","));
        assert!(!with.ends_with(",,"));
        let without = encode("a,", "k", false).output;
        assert!(without.ends_with('"'));
    }

    #[test]
    fn escapes_quotes_backslashes_and_controls() {
        let result = encode("say \"hi\"\t\\ \u{1}\r", "k", false);
        assert_eq!(
            result.output,
            r#""k": "say \"hi\"\t\\ \u0001\r""#
        );
    }

    #[test]
    fn key_is_not_escaped() {
        let result = encode("x", "we\"ird", false);
        assert_eq!(result.output, "\"we\"ird\": \"x\"");
    }

    #[test]
    fn non_ascii_kept_by_default() {
        assert_eq!(escape_literal("café ☃", false).unwrap(), "\"café ☃\"");
    }

    #[test]
    fn ascii_only_escapes_utf16_units() {
        assert_eq!(
            escape_literal("é🦀", true).unwrap(),
            "\"\\u00e9\\ud83e\\udd80\""
        );
        let options = EncodeOptions::new("k")
            .with_trailing_comma(false)
            .with_ascii_only(true);
        let line = encode_with("naïve", &options).output;
        assert_eq!(line, "\"k\": \"na\\u00efve\"");
        let back: String = serde_json::from_str(&line["\"k\": ".len()..]).unwrap();
        assert_eq!(back, "naïve");
    }

    #[test]
    fn literal_round_trips_through_serde_json() {
        let raw = "#!/bin/sh\nset -e\necho '[x]' \"$HOME\"\\n\r\n\ttab";
        let literal = escape_literal(raw, false).unwrap();
        let back: String = serde_json::from_str(&literal).unwrap();
        assert_eq!(back, raw);
    }
}
