//! Purpose: Hold top-level CLI command dispatch for `shellkv`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Clipboard failures surface as notices and never change the exit code.

use super::*;
use shellkv::{EncodeOptions, decode_text, encode_line};

pub(super) fn dispatch_command(
    command: Command,
    color_mode: ColorMode,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "shellkv", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Encode {
            file,
            text,
            key,
            no_trailing_comma,
            ascii,
            copy,
        } => {
            let raw = input_source::read_input(text, file.as_deref())?;
            let key = key.unwrap_or_else(input_source::default_key_name);
            let options = EncodeOptions::new(key)
                .with_trailing_comma(!no_trailing_comma)
                .with_ascii_only(ascii);
            let line = encode_line(&raw, &options)?;
            if !line.is_empty() {
                emit_text(&line, true)?;
            }
            if copy {
                copy_output("encode", &line, color_mode);
            }
            Ok(RunOutcome::ok())
        }
        Command::Decode {
            file,
            text,
            json,
            copy,
        } => {
            let raw = input_source::read_input(text, file.as_deref())?;
            let decoded = decode_text(&raw)?;
            if json {
                let envelope = serde_json::to_value(&decoded).map_err(|err| {
                    Error::new(ErrorKind::Internal)
                        .with_message("failed to serialize decode result")
                        .with_source(err)
                })?;
                emit_json(envelope);
            } else if !decoded.output.is_empty() {
                let newline = io::stdout().is_terminal() && !decoded.output.ends_with('\n');
                emit_text(&decoded.output, newline)?;
            }
            if copy {
                copy_output("decode", &decoded.output, color_mode);
            }
            Ok(RunOutcome::ok())
        }
    }
}

fn copy_output(cmd: &str, output: &str, color_mode: ColorMode) {
    if output.is_empty() {
        return;
    }
    match clipboard::copy_to_clipboard(output) {
        Ok(tool) => tracing::debug!(tool = %tool, "copied output to clipboard"),
        Err(err) => {
            tracing::warn!(error = %err, "clipboard copy failed");
            let mut details = Map::new();
            if let Some(hint) = err.hint() {
                details.insert("hint".to_string(), json!(hint));
            }
            let causes = error_causes(&err);
            if !causes.is_empty() {
                details.insert("causes".to_string(), json!(causes));
            }
            let notice = Notice {
                kind: "clipboard".to_string(),
                time: notice_time_now().unwrap_or_default(),
                cmd: cmd.to_string(),
                message: error_message(&err),
                details,
            };
            emit_notice(&notice, color_mode);
        }
    }
}
