//! Purpose: Resolve where CLI input comes from and the default key name.
//! Exports: `read_input`, `default_key_name`, `KEY_ENV`.
//! Invariants: `--text` wins over FILE; FILE `-` and no FILE both mean stdin.
//! Invariants: Input is read whole and unmodified (no newline or encoding normalization).

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use shellkv::{DEFAULT_KEY_NAME, Error, ErrorKind};

pub(crate) const KEY_ENV: &str = "SHELLKV_KEY";

pub(crate) fn default_key_name() -> String {
    std::env::var(KEY_ENV)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_KEY_NAME.to_string())
}

pub(crate) fn read_input(text: Option<String>, file: Option<&Path>) -> Result<String, Error> {
    if let Some(text) = text {
        return Ok(text);
    }
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message(format!("failed to read {}", path.display()))
                .with_hint("Check that the file exists and is UTF-8 text.")
                .with_source(err)
        }),
        Some(_) => read_stdin(),
        None => {
            if io::stdin().is_terminal() {
                return Err(missing_input_error());
            }
            read_stdin()
        }
    }
}

fn read_stdin() -> Result<String, Error> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to read stdin")
            .with_hint("Pipe UTF-8 text, or pass --text.")
            .with_source(err)
    })?;
    Ok(buf)
}

fn missing_input_error() -> Error {
    Error::new(ErrorKind::Usage)
        .with_message("no input provided")
        .with_hint("Pass a FILE, use --text, or pipe a script on stdin.")
}
