//! Purpose: `shellkv` CLI entry point.
//! Role: Binary crate root; parses args, reads input, runs a conversion, prints the result.
//! Invariants: stdout carries only conversion output; diagnostics go to stderr.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `to_exit_code`.
use std::error::Error as StdError;
use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{
    CommandFactory, Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind,
};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod clipboard;
mod command_dispatch;
mod input_source;

use shellkv::notice::{Notice, notice_json};
use shellkv::{Error, ErrorKind, to_exit_code};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let args: Vec<OsString> = std::env::args_os().collect();
    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                let message = clap_error_summary(&err);
                let hint = clap_error_hint(&args);
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(message)
                        .with_hint(hint),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    command_dispatch::dispatch_command(cli.command, color_mode).map_err(|err| (err, color_mode))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "shellkv",
    version,
    about = "Convert shell scripts to and from JSON key/value lines",
    help_template = r#"{about-with-newline}
{before-help}USAGE
  {usage}

COMMANDS
{subcommands}

OPTIONS
{options}

{after-help}
"#,
    long_about = None,
    before_help = r#"Embed a multi-line script in a JSON config file as one escaped string, and get it back.

Mental model:
  - `encode` turns a raw script into `"key": "escaped\nscript",`
  - `decode` turns a JSON string literal or key/value line back into the script
"#,
    after_help = r#"EXAMPLES
  $ shellkv encode install.sh --key installScript
  $ printf 'echo hi\nexit 0' | shellkv encode --no-trailing-comma
  $ shellkv decode --text '"installScript": "echo hi\nexit 0",'
  $ shellkv encode install.sh | shellkv decode

LEARN MORE
  $ shellkv <command> --help"#,
    arg_required_else_help = true,
    disable_help_subcommand = false
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(
        about = "Escape a raw script into a \"key\": \"value\" JSON line",
        long_about = r#"Escape a raw script into a single JSON key/value line.

The script is encoded verbatim: quotes, backslashes and control characters
are escaped, line endings are kept as-is. Empty input prints nothing."#,
        after_help = r#"EXAMPLES
  $ shellkv encode install.sh
  $ shellkv encode install.sh --key setup --no-trailing-comma
  $ shellkv encode --text 'echo "hi"' --ascii
  $ cat install.sh | shellkv encode --copy

NOTES
  - The default key comes from $SHELLKV_KEY, else `installScript`.
  - The key is inserted as-is; a key containing `"` produces invalid JSON."#
    )]
    Encode {
        #[arg(help = "Script file to read (`-` for stdin; default: stdin)", value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        #[arg(long, conflicts_with = "file", help = "Script text given inline")]
        text: Option<String>,
        #[arg(short = 'k', long = "key", help = "Key name for the JSON line")]
        key: Option<String>,
        #[arg(long, help = "Do not append a trailing comma")]
        no_trailing_comma: bool,
        #[arg(long, help = "Escape non-ASCII characters as \\uXXXX")]
        ascii: bool,
        #[arg(long, help = "Also copy the output to the system clipboard")]
        copy: bool,
    },
    #[command(
        about = "Recover a raw script from a JSON string or key/value line",
        long_about = r#"Recover a raw script from a JSON string literal or a "key": "value" line.

Accepts `"key": "value"`, `"key": "value",`, `key: "value"` or a bare
`"value"` literal. Surrounding whitespace and one trailing comma are ignored."#,
        after_help = r#"EXAMPLES
  $ shellkv decode --text '"installScript": "echo hi\nexit 0",'
  $ shellkv decode config-line.txt > install.sh
  $ shellkv decode --json < config-line.txt

NOTES
  - Output is written verbatim; a newline is added only on a terminal.
  - `--json` prints {"output": ..., "key": ...} instead of the raw script."#
    )]
    Decode {
        #[arg(help = "File holding the JSON line (`-` for stdin; default: stdin)", value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        #[arg(long, conflicts_with = "file", help = "JSON text given inline")]
        text: Option<String>,
        #[arg(long, help = "Emit a JSON object with the output and recognized key")]
        json: bool,
        #[arg(long, help = "Also copy the output to the system clipboard")]
        copy: bool,
    },
    #[command(
        arg_required_else_help = true,
        about = "Generate shell completions",
        after_help = r#"EXAMPLES
  $ shellkv completion bash > ~/.local/share/bash-completion/completions/shellkv
  $ shellkv completion zsh > "${fpath[1]}/_shellkv""#
    )]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn emit_json(value: Value) {
    let json = if io::stdout().is_terminal() {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

fn emit_text(text: &str, newline: bool) -> Result<(), Error> {
    let mut stdout = io::stdout().lock();
    let write = |stdout: &mut io::StdoutLock<'_>| -> io::Result<()> {
        stdout.write_all(text.as_bytes())?;
        if newline {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()
    };
    write(&mut stdout).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write output")
            .with_source(err)
    })
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn notice_time_now() -> Option<String> {
    use time::format_description::well_known::Rfc3339;
    let duration = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
    let ts = time::OffsetDateTime::from_unix_timestamp_nanos(duration.as_nanos() as i128).ok()?;
    ts.format(&Rfc3339).ok()
}

fn emit_notice(notice: &Notice, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        let label = colorize_label("notice:", color_mode.use_color(is_tty), AnsiColor::Yellow);
        eprintln!("{label} {}", notice.message);
        return;
    }

    let value = notice_json(notice);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"notice\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    err.message()
        .unwrap_or_else(|| err.kind().describe())
        .to_string()
}

fn error_causes(err: &Error) -> Vec<String> {
    std::iter::successors(err.source(), |&source| source.source())
        .map(ToString::to_string)
        .collect()
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }
    json!({ "error": inner })
}

fn error_text(err: &Error, use_color: bool) -> String {
    let label = |text: &str, color| colorize_label(text, use_color, color);
    let mut lines = vec![format!("{} {}", label("error:", AnsiColor::Red), error_message(err))];
    if let Some(hint) = err.hint() {
        lines.push(format!("{} {hint}", label("hint:", AnsiColor::Yellow)));
    }
    if let Some(cause) = err.source() {
        lines.push(format!("{} {cause}", label("caused by:", AnsiColor::Yellow)));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    err.to_string()
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.strip_prefix("error:").unwrap_or(line).trim().to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}

/// Points at the subcommand's help when one appears on the command line.
fn clap_error_hint(args: &[OsString]) -> String {
    let cli = Cli::command();
    let subcommand = args.iter().skip(1).find_map(|arg| {
        let arg = arg.to_str()?;
        cli.find_subcommand(arg).map(|cmd| cmd.get_name().to_string())
    });
    match subcommand {
        Some(name) => format!("Try `shellkv {name} --help`."),
        None => "Try `shellkv --help`.".to_string(),
    }
}
