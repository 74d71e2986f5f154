use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gardenwire_core::{ReadingRecord, decode_reading, make_reading_record};
use tracing_subscriber::EnvFilter;

mod listen;
mod render;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("GARDENWIRE_BUILD_COMMIT"),
    ", ",
    env!("GARDENWIRE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "gardenwire")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder and MQTT listener for garden sensor cluster telemetry.",
    long_about = None,
    after_help = "Examples:\n  gardenwire decode payload.bin --pretty\n  gardenwire decode --hex 0000000032ff143c010a000500 --text\n  gardenwire listen --host broker.local --topic elec4740g6/data"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a single telemetry payload from a file or hex string.
    #[command(
        after_help = "Examples:\n  gardenwire decode payload.bin -o record.json\n  gardenwire decode --hex 0000000032ff143c01 --pretty"
    )]
    Decode {
        /// Path to a raw payload file
        #[arg(required_unless_present = "hex")]
        input: Option<PathBuf>,

        /// Payload bytes as hex digits (whitespace allowed) instead of a file
        #[arg(long, conflicts_with = "input")]
        hex: Option<String>,

        /// Topic name to embed in the output record
        #[arg(long)]
        topic: Option<String>,

        /// Output record path (JSON); stdout when omitted
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Render the human-readable timeline instead of JSON
        #[arg(long, conflicts_with_all = ["pretty", "compact"])]
        text: bool,

        /// Suppress warnings and non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Subscribe to an MQTT broker and decode arriving payloads.
    Listen(listen::ListenOpts),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode {
            input,
            hex,
            topic,
            output,
            pretty,
            compact,
            text,
            quiet,
        } => cmd_decode(input, hex, topic, output, pretty, compact, text, quiet),
        Commands::Listen(opts) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_writer(std::io::stderr)
                .init();
            listen::run(opts).await.map_err(CliError::from)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_decode(
    input: Option<PathBuf>,
    hex: Option<String>,
    topic: Option<String>,
    output: Option<PathBuf>,
    pretty: bool,
    compact: bool,
    text: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let payload = read_payload(input.as_deref(), hex.as_deref())?;

    let decoded = decode_reading(&payload).map_err(|err| {
        CliError::new(
            format!("undecodable payload: {err}"),
            Some("telemetry payloads start with a 9-byte header".to_string()),
        )
    })?;

    if !quiet {
        for warning in &decoded.warnings {
            eprintln!("warning: {warning}");
        }
    }

    let rendered = if text {
        render::render_reading(&decoded.reading)
    } else {
        let record = make_reading_record(topic.as_deref(), &decoded);
        serialize_record(&record, pretty, compact)?
    };

    match output {
        None => {
            print!("{rendered}");
            Ok(())
        }
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&path, rendered)
                .with_context(|| format!("Failed to write record: {}", path.display()))?;
            if !quiet {
                eprintln!("OK: record written -> {}", path.display());
            }
            Ok(())
        }
    }
}

fn read_payload(input: Option<&std::path::Path>, hex: Option<&str>) -> Result<Vec<u8>, CliError> {
    if let Some(hex) = hex {
        return parse_hex_payload(hex);
    }
    let input = input.expect("clap requires input when --hex is absent");
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a raw payload file or use --hex".to_string()),
        ));
    }
    fs::read(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))
        .map_err(Into::into)
}

fn parse_hex_payload(hex: &str) -> Result<Vec<u8>, CliError> {
    let cleaned: String = hex.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.len() % 2 != 0 {
        return Err(CliError::new(
            "hex payload has an odd number of digits",
            Some("pass whole bytes, two hex digits each".to_string()),
        ));
    }
    (0..cleaned.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&cleaned[i..i + 2], 16).map_err(|_| {
                CliError::new(
                    format!("invalid hex byte '{}'", &cleaned[i..i + 2]),
                    Some("only 0-9 and a-f are allowed".to_string()),
                )
            })
        })
        .collect()
}

fn serialize_record(record: &ReadingRecord, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    let json = if pretty {
        serde_json::to_string_pretty(record)
            .context("JSON serialization failed")
            .map_err(CliError::from)?
    } else {
        serde_json::to_string(record)
            .context("JSON serialization failed")
            .map_err(CliError::from)?
    };
    Ok(json + "\n")
}
