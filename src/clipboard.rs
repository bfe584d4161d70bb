//! Purpose: Copy CLI output to the system clipboard through an external tool.
//! Exports: `copy_to_clipboard`, `CLIPBOARD_CMD_ENV`.
//! Role: Optional side effect after a conversion; callers downgrade failures to notices.
//! Invariants: Tools are tried in order; a missing or failing tool falls through to the next.
//! Invariants: `$SHELLKV_CLIPBOARD_CMD` replaces the built-in tool list when set.
use std::io::{self, Write};
use std::process::{Command, Stdio};

use shellkv::{Error, ErrorKind};

pub(crate) const CLIPBOARD_CMD_ENV: &str = "SHELLKV_CLIPBOARD_CMD";

const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip.exe", &[]),
];

/// Returns the program that accepted the text.
pub(crate) fn copy_to_clipboard(text: &str) -> Result<String, Error> {
    let candidates = clipboard_candidates();
    let mut last_err = None;
    for (program, args) in &candidates {
        match pipe_into(program, args, text) {
            Ok(()) => return Ok(program.clone()),
            Err(err) => {
                tracing::debug!(program = %program, error = %err, "clipboard tool unavailable");
                last_err = Some(err);
            }
        }
    }

    let err = Error::new(ErrorKind::Io)
        .with_message("failed to copy output to clipboard")
        .with_hint(format!(
            "Install wl-copy, xclip, xsel or pbcopy, or set ${CLIPBOARD_CMD_ENV}."
        ));
    Err(match last_err {
        Some(source) => err.with_source(source),
        None => err,
    })
}

fn clipboard_candidates() -> Vec<(String, Vec<String>)> {
    if let Some(custom) = std::env::var(CLIPBOARD_CMD_ENV)
        .ok()
        .and_then(|value| parse_command_line(&value))
    {
        return vec![custom];
    }
    CLIPBOARD_TOOLS
        .iter()
        .map(|(program, args)| {
            (
                program.to_string(),
                args.iter().map(|arg| arg.to_string()).collect(),
            )
        })
        .collect()
}

fn parse_command_line(value: &str) -> Option<(String, Vec<String>)> {
    let mut parts = value.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

fn pipe_into(program: &str, args: &[String], text: &str) -> io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    // Reap the child even when it closed stdin early; its exit status explains the failure.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    let status = child.wait()?;
    if !status.success() {
        return Err(io::Error::other(format!("{program} exited with {status}")));
    }
    written
}

#[cfg(test)]
mod tests {
    use super::{parse_command_line, pipe_into};

    #[test]
    fn command_line_splits_program_and_args() {
        assert_eq!(
            parse_command_line("xclip -selection primary"),
            Some((
                "xclip".to_string(),
                vec!["-selection".to_string(), "primary".to_string()]
            ))
        );
        assert_eq!(parse_command_line("   "), None);
    }

    #[cfg(unix)]
    #[test]
    fn tool_that_ignores_stdin_is_reaped_and_reported() {
        let text = "x".repeat(1 << 20);
        assert!(pipe_into("true", &[], &text).is_err());
        assert!(pipe_into("false", &[], "short").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn tool_that_reads_stdin_succeeds() {
        assert!(pipe_into("cat", &[], "echo hi\n").is_ok());
    }

    #[test]
    fn missing_tool_is_an_error() {
        assert!(pipe_into("shellkv-no-such-clipboard-tool", &[], "x").is_err());
    }
}
