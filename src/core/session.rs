//! Purpose: Caller-owned interactive converter state (mode, input, key, output).
//! Exports: `ConverterSession`, `DEFAULT_KEY_NAME`.
//! Role: Replaces implicit UI globals; every change re-runs the active conversion.
//! Invariants: `output` and `error` always reflect the latest `apply`.
//! Invariants: Toggling seeds the new input only from an error-free, non-empty output.
use crate::core::conversion::{ConversionMode, ConversionRequest, ConversionResult};

pub const DEFAULT_KEY_NAME: &str = "installScript";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConverterSession {
    mode: ConversionMode,
    input: String,
    key_name: String,
    add_trailing_comma: bool,
    ascii_only: bool,
    last: ConversionResult,
}

impl Default for ConverterSession {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_NAME)
    }
}

impl ConverterSession {
    pub fn new(key_name: impl Into<String>) -> Self {
        Self {
            mode: ConversionMode::Encode,
            input: String::new(),
            key_name: key_name.into(),
            add_trailing_comma: true,
            ascii_only: false,
            last: ConversionResult::default(),
        }
    }

    pub fn mode(&self) -> ConversionMode {
        self.mode
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub fn add_trailing_comma(&self) -> bool {
        self.add_trailing_comma
    }

    pub fn output(&self) -> &str {
        &self.last.output
    }

    pub fn error(&self) -> Option<&str> {
        self.last.error.as_deref()
    }

    pub fn result(&self) -> &ConversionResult {
        &self.last
    }

    pub fn set_input(&mut self, input: impl Into<String>) -> &ConversionResult {
        self.input = input.into();
        self.apply()
    }

    pub fn set_key_name(&mut self, key_name: impl Into<String>) -> &ConversionResult {
        self.key_name = key_name.into();
        self.apply()
    }

    pub fn set_add_trailing_comma(&mut self, add_trailing_comma: bool) -> &ConversionResult {
        self.add_trailing_comma = add_trailing_comma;
        self.apply()
    }

    pub fn set_ascii_only(&mut self, ascii_only: bool) -> &ConversionResult {
        self.ascii_only = ascii_only;
        self.apply()
    }

    pub fn set_mode(&mut self, mode: ConversionMode) -> &ConversionResult {
        self.mode = mode;
        self.apply()
    }

    pub fn request(&self) -> ConversionRequest {
        ConversionRequest {
            raw_input: self.input.clone(),
            key_name: self.key_name.clone(),
            add_trailing_comma: self.add_trailing_comma,
            ascii_only: self.ascii_only,
            mode: self.mode,
        }
    }

    /// Runs the active mode over the current input.
    pub fn apply(&mut self) -> &ConversionResult {
        let (result, key_name) = self.request().run();
        if let Some(key_name) = key_name {
            self.key_name = key_name;
        }
        self.last = result;
        &self.last
    }

    pub fn apply_encode(&mut self) -> &ConversionResult {
        self.set_mode(ConversionMode::Encode)
    }

    pub fn apply_decode(&mut self) -> &ConversionResult {
        self.set_mode(ConversionMode::Decode)
    }

    /// Flips the mode, feeding the previous output back in when it succeeded.
    pub fn toggle_mode(&mut self) -> &ConversionResult {
        if !self.last.output.is_empty() && self.last.error.is_none() {
            self.input = std::mem::take(&mut self.last.output);
        } else {
            self.input.clear();
        }
        self.last = ConversionResult::default();
        self.mode = self.mode.toggled();
        self.apply()
    }
}
