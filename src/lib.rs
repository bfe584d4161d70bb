//! Purpose: Library crate behind the `shellkv` CLI: script <-> JSON key/value conversion.
//! Exports: `core` (encode, decode, session, errors), `notice`, and root re-exports.
//! Role: Pure string transformations; the CLI owns all I/O.
//! Invariants: Conversions are synchronous, deterministic, and free of hidden state.
//! Invariants: Failures are reported through result values, never panics.
pub mod core;
mod json;
pub mod notice;

pub use crate::core::conversion::{
    ConversionMode, ConversionRequest, ConversionResult, DecodeResult,
};
pub use crate::core::decode::{Decoded, decode, decode_text};
pub use crate::core::encode::{EncodeOptions, encode, encode_line, encode_with};
pub use crate::core::error::{Error, ErrorKind, to_exit_code};
pub use crate::core::session::{ConverterSession, DEFAULT_KEY_NAME};
