//! Purpose: Transient value types exchanged with the converter.
//! Exports: `ConversionMode`, `ConversionRequest`, `ConversionResult`, `DecodeResult`.
//! Invariants: A result carries either a meaningful `output` or an `error`, never both.
use crate::core::decode::{Decoded, decode};
use crate::core::encode::{EncodeOptions, encode_with};
use crate::core::error::Error;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ConversionMode {
    #[default]
    Encode,
    Decode,
}

impl ConversionMode {
    pub fn toggled(self) -> Self {
        match self {
            ConversionMode::Encode => ConversionMode::Decode,
            ConversionMode::Decode => ConversionMode::Encode,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConversionResult {
    pub output: String,
    pub error: Option<String>,
}

impl ConversionResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            output: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of `decode`. `key_name` is set only when a key was recognized.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DecodeResult {
    pub output: String,
    pub error: Option<String>,
    pub key_name: Option<String>,
}

impl From<Result<Decoded, Error>> for DecodeResult {
    fn from(result: Result<Decoded, Error>) -> Self {
        match result {
            Ok(decoded) => Self {
                output: decoded.output,
                error: None,
                key_name: decoded.key_name,
            },
            Err(err) => Self {
                output: String::new(),
                error: Some(err.message().unwrap_or("decode failed").to_string()),
                key_name: None,
            },
        }
    }
}

impl From<DecodeResult> for ConversionResult {
    fn from(result: DecodeResult) -> Self {
        Self {
            output: result.output,
            error: result.error,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConversionRequest {
    pub raw_input: String,
    pub key_name: String,
    pub add_trailing_comma: bool,
    pub ascii_only: bool,
    pub mode: ConversionMode,
}

impl ConversionRequest {
    /// Runs the selected operation. The second element is the key recognized by decode.
    pub fn run(&self) -> (ConversionResult, Option<String>) {
        match self.mode {
            ConversionMode::Encode => {
                let options = EncodeOptions::new(self.key_name.clone())
                    .with_trailing_comma(self.add_trailing_comma)
                    .with_ascii_only(self.ascii_only);
                (encode_with(&self.raw_input, &options), None)
            }
            ConversionMode::Decode => {
                let result = decode(&self.raw_input);
                let key_name = result.key_name.clone();
                (result.into(), key_name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConversionMode, ConversionRequest, ConversionResult};

    fn request(raw: &str, mode: ConversionMode) -> ConversionRequest {
        ConversionRequest {
            raw_input: raw.to_string(),
            key_name: "script".to_string(),
            add_trailing_comma: false,
            ascii_only: false,
            mode,
        }
    }

    #[test]
    fn toggled_flips_mode() {
        assert_eq!(ConversionMode::Encode.toggled(), ConversionMode::Decode);
        assert_eq!(ConversionMode::Decode.toggled(), ConversionMode::Encode);
    }

    #[test]
    fn run_dispatches_on_mode() {
        let (encoded, key) = request("ls -la", ConversionMode::Encode).run();
        assert_eq!(encoded, ConversionResult::ok("\"script\": \"ls -la\""));
        assert_eq!(key, None);

        let (decoded, key) = request("\"cmd\": \"ls -la\"", ConversionMode::Decode).run();
        assert_eq!(decoded, ConversionResult::ok("ls -la"));
        assert_eq!(key.as_deref(), Some("cmd"));
    }

    #[test]
    fn decode_failure_has_no_output() {
        let (result, key) = request("nope", ConversionMode::Decode).run();
        assert!(!result.is_ok());
        assert!(result.output.is_empty());
        assert_eq!(key, None);
    }
}
