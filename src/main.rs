//! Purpose: `pif` CLI entry point for normalizing and inspecting value documents.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: Commands emit stable stdout formats (one JSON document or JSON lines).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::ffi::OsString;
use std::fs;
use std::io::{self, IsTerminal, Read};

use clap::{Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use pif::api::{Error, ErrorKind, Extensible, NumericValue, Record, document, to_exit_code};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod color_json;

use color_json::colorize_records;

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
    let exit_code = match run(std::env::args_os()) {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run<I>(args: I) -> Result<RunOutcome, (Error, ColorMode)>
where
    I: IntoIterator<Item = OsString>,
{
    let cli = match Cli::try_parse_from(args) {
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
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Try `pif --help`."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    dispatch(cli.command, color_mode)
        .map_err(add_shape_hint)
        .map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "pif",
    version,
    about = "Normalize and inspect physical-information value records",
    long_about = None,
    after_help = r#"EXAMPLES
  $ pif normalize value.json
  $ echo '{"vectors":[1,2],"note":"kept"}' | pif normalize
  # {"note":"kept","vectors":[[1,2]]}
  $ pif inspect --color never values.json

Fields the model does not declare are preserved verbatim."#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics and pretty JSON output: auto|always|never"
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
        about = "Rewrite value records in canonical form",
        long_about = r#"Rewrite value records in canonical form.

Input is one value object or an array of them. Vectors and matrices written
with minimal nesting are emitted as lists (`[1,2]` becomes `[[1,2]]`).
Unknown fields are emitted unchanged."#
    )]
    Normalize {
        #[arg(
            default_value = "-",
            help = "Input file path (use - for stdin)",
            value_hint = ValueHint::FilePath
        )]
        input: String,
        #[arg(long, help = "Pretty-print output")]
        pretty: bool,
    },
    #[command(
        about = "Summarize value records as JSON lines",
        long_about = r#"Summarize value records as JSON lines.

Each line reports name, units, scalar/vector/matrix counts, and the names
of fields the model does not declare."#
    )]
    Inspect {
        #[arg(
            default_value = "-",
            help = "Input file path (use - for stdin)",
            value_hint = ValueHint::FilePath
        )]
        input: String,
    },
}

fn dispatch(command: Command, color_mode: ColorMode) -> Result<RunOutcome, Error> {
    match command {
        Command::Normalize { input, pretty } => {
            let (records, was_array) = read_records(&input)?;
            let value = if was_array {
                Value::Array(records.iter().map(Record::to_json).collect())
            } else {
                records
                    .first()
                    .map(Record::to_json)
                    .ok_or_else(|| Error::new(ErrorKind::Internal).with_message("no record"))?
            };
            emit_value(&value, pretty, color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Inspect { input } => {
            let (records, _) = read_records(&input)?;
            for record in &records {
                let line = serde_json::to_string(&inspect_json(record))
                    .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
                println!("{line}");
            }
            Ok(RunOutcome::ok())
        }
    }
}

fn read_input(input: &str) -> Result<Vec<u8>, Error> {
    if input == "-" {
        let mut bytes = Vec::new();
        io::stdin().read_to_end(&mut bytes).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read stdin")
                .with_source(err)
        })?;
        return Ok(bytes);
    }
    fs::read(input).map_err(|err| {
        let hint = match err.kind() {
            io::ErrorKind::NotFound => "Check the input path.",
            io::ErrorKind::PermissionDenied => "Check file permissions.",
            _ => "I/O error. Check the path and filesystem.",
        };
        Error::new(ErrorKind::Io)
            .with_message(format!("failed to read {input}"))
            .with_hint(hint)
            .with_source(err)
    })
}

fn read_records(input: &str) -> Result<(Vec<NumericValue>, bool), Error> {
    let bytes = read_input(input)?;
    let node = document::value_from_slice(&bytes)?;
    let records: Vec<NumericValue> = document::many_from_value(&node)?;
    tracing::debug!(input, count = records.len(), "parsed value records");
    Ok((records, node.is_array()))
}

fn inspect_json(record: &NumericValue) -> Value {
    let mut extras: Vec<&str> = record.extra_fields().keys().collect();
    extras.sort_unstable();
    json!({
        "name": record.name(),
        "units": record.units(),
        "scalars": record.scalar_count(),
        "vectors": record.vector_count(),
        "matrices": record.matrix_count(),
        "extra_fields": extras,
    })
}

fn emit_value(value: &Value, pretty: bool, color_mode: ColorMode) {
    let use_color = color_mode.use_color(io::stdout().is_terminal());
    let json = if pretty {
        colorize_records(value, NumericValue::<pif::api::Scalar>::FIELDS, use_color)
    } else {
        serde_json::to_string(value)
            .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string())
    };
    println!("{json}");
}

fn add_shape_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Shape || err.hint().is_some() {
        return err;
    }
    err.with_hint(
        "vectors accept [1,2] or [[1,2],[3]]; matrices accept [[1,2],[3,4]] or [[[1]],[[2]]].",
    )
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

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
        ErrorKind::Syntax => "malformed JSON".to_string(),
        ErrorKind::Type => "unexpected JSON type".to_string(),
        ErrorKind::Shape => "unrecognized array shape".to_string(),
        ErrorKind::Leaf => "invalid leaf value".to_string(),
        ErrorKind::IndexOutOfRange => "index out of range".to_string(),
    }
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(pointer) = err.pointer() {
        inner.insert("pointer".to_string(), json!(pointer));
    }
    if let Some(index) = err.index() {
        inner.insert("index".to_string(), json!(index));
    }
    if let Some(count) = err.count() {
        inner.insert("count".to_string(), json!(count));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
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

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = vec![format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    )];
    if let Some(pointer) = err.pointer() {
        let shown = if pointer.is_empty() { "/" } else { pointer };
        lines.push(format!(
            "{} {shown}",
            colorize_label("at:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
