//! Purpose: Provide the internal JSON decode entrypoints and failure labels.
//! Exports: `from_str`, `ParseFailureCategory`, `categorize_error`, `hint_for_error`.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Invariants: Category labels are stable; hints never echo the input payload.
//! Notes: Error mapping to `Error` is done by callsites so domain context stays explicit.

use serde::de::DeserializeOwned;
use serde_json::error::Category;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseFailureCategory {
    Syntax,
    Truncated,
    ControlCharacter,
    Unicode,
    NumericRange,
    DepthLimit,
    Data,
    Io,
    Unknown,
}

impl ParseFailureCategory {
    pub(crate) fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Truncated => "truncated",
            ParseFailureCategory::ControlCharacter => "control-character",
            ParseFailureCategory::Unicode => "unicode",
            ParseFailureCategory::NumericRange => "numeric-range",
            ParseFailureCategory::DepthLimit => "depth-limit",
            ParseFailureCategory::Data => "data",
            ParseFailureCategory::Io => "io",
            ParseFailureCategory::Unknown => "unknown",
        }
    }

    fn advice(self) -> &'static str {
        match self {
            ParseFailureCategory::ControlCharacter => {
                "Line breaks and tabs inside a JSON string must be escaped as \\n and \\t."
            }
            ParseFailureCategory::Truncated => {
                "The JSON value ends early; check for a missing closing quote."
            }
            ParseFailureCategory::Unicode => "A \\u escape does not form a valid code point.",
            _ => "Provide a JSON string literal or a \"key\": \"value\" line.",
        }
    }
}

pub(crate) fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(input)
}

pub(crate) fn categorize_message(message: &str) -> ParseFailureCategory {
    let lower = message.to_ascii_lowercase();
    if lower.contains("recursion limit") {
        ParseFailureCategory::DepthLimit
    } else if lower.contains("number out of range") {
        ParseFailureCategory::NumericRange
    } else if lower.contains("control character") {
        ParseFailureCategory::ControlCharacter
    } else if lower.contains("surrogate")
        || lower.contains("unicode code point")
        || lower.contains("hex escape")
    {
        ParseFailureCategory::Unicode
    } else {
        ParseFailureCategory::Unknown
    }
}

pub(crate) fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match categorize_message(&err.to_string()) {
        ParseFailureCategory::Unknown => match err.classify() {
            Category::Syntax => ParseFailureCategory::Syntax,
            Category::Eof => ParseFailureCategory::Truncated,
            Category::Data => ParseFailureCategory::Data,
            Category::Io => ParseFailureCategory::Io,
        },
        specific => specific,
    }
}

pub(crate) fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    let category = categorize_error(err);
    format!(
        "{} (parse category: {}; context: {context})",
        category.advice(),
        category.label()
    )
}
