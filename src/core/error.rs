//! Purpose: Structured error type shared by the converter and the CLI.
//! Exports: `Error`, `ErrorKind`, `to_exit_code`.
//! Invariants: Exit codes per kind are stable once published.
use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    MalformedJson,
    Io,
}

impl ErrorKind {
    /// Fallback message when an error carries none of its own.
    pub fn describe(self) -> &'static str {
        match self {
            ErrorKind::Internal => "internal error",
            ErrorKind::Usage => "usage error",
            ErrorKind::MalformedJson => "malformed json",
            ErrorKind::Io => "i/o error",
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::MalformedJson => 3,
        ErrorKind::Io => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_exit_code};
    use std::error::Error as StdError;

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [
            (ErrorKind::Internal, 1),
            (ErrorKind::Usage, 2),
            (ErrorKind::MalformedJson, 3),
            (ErrorKind::Io, 4),
        ];

        for (kind, code) in cases {
            assert_eq!(to_exit_code(kind), code);
        }
    }

    #[test]
    fn kinds_have_fallback_descriptions() {
        assert_eq!(ErrorKind::Usage.describe(), "usage error");
        assert_eq!(ErrorKind::MalformedJson.describe(), "malformed json");
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = Error::new(ErrorKind::MalformedJson).with_message("bad input");
        assert_eq!(err.to_string(), "MalformedJson: bad input");
        assert_eq!(Error::new(ErrorKind::Io).to_string(), "Io");
    }

    #[test]
    fn source_is_chained() {
        let io = std::io::Error::other("disk gone");
        let err = Error::new(ErrorKind::Io)
            .with_message("failed to read input")
            .with_hint("Check the file path.")
            .with_source(io);
        assert_eq!(err.hint(), Some("Check the file path."));
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("disk gone"));
    }
}
