//! CLI for cite-format - Format bibliographic records as citations.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use cite_format::{
    format_citation, parse_records, render_json, render_text, style_names, BibliographicRecord,
    CitationCopier, CitationStyle, FormattedRecord, RecordError, SystemClipboard,
};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Format bibliographic records as APA, MLA, Chicago and Harvard citations
#[derive(Parser)]
#[command(name = "cite-format")]
#[command(version)]
#[command(after_help = "\
Examples:
  cite-format format books.json
  cite-format format books.jsonl --style apa --style mla
  cite-format format books.json --record 2 --json
  cat book.json | cite-format copy - --style harvard
  cite-format styles")]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print citations for records in a JSON or JSONL file
    #[command(after_help = "\
Records need a \"title\"; optional keys are author, authorFamilyName,
publisher, publishYear, edition and doi (snake_case column names work too).")]
    Format {
        /// Records file (use '-' for stdin)
        input: PathBuf,

        /// Style to print, repeatable (default: all styles)
        #[arg(short, long)]
        style: Vec<String>,

        /// Only format the N-th record (1-based)
        #[arg(short, long)]
        record: Option<usize>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Copy one citation to the system clipboard
    #[command(after_help = "\
The citation is also printed to stdout.
On X11 the copied text is served by this process and can disappear when it
exits unless a clipboard manager is running.")]
    Copy {
        /// Records file (use '-' for stdin)
        input: PathBuf,

        /// Style to copy (see 'styles' command)
        #[arg(short, long)]
        style: String,

        /// Record to copy from (1-based)
        #[arg(short, long, default_value_t = 1)]
        record: usize,
    },

    /// List available citation styles
    Styles,
}

// ---------------------------------------------------------------------------
// AppError — semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 10 — input file not found / unreadable
    InputFile(String),
    /// Exit 11 — record data is not valid JSON / JSONL
    RecordData(String),
    /// Exit 12 — unknown citation style
    Style(String),
    /// Exit 13 — requested record does not exist
    RecordIndex(String),
    /// Exit 14 — clipboard copy failed
    Clipboard(String),
    /// Exit 15 — cannot write output
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::InputFile(_) => 10,
            AppError::RecordData(_) => 11,
            AppError::Style(_) => 12,
            AppError::RecordIndex(_) => 13,
            AppError::Clipboard(_) => 14,
            AppError::OutputFile(_) => 15,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InputFile(msg) => {
                write!(f, "{}\n  hint: verify the file path is correct", msg)
            }
            AppError::RecordData(msg) => {
                write!(
                    f,
                    "{}\n  hint: the file must be a JSON object, a JSON array of objects, or JSONL (one object per line), each with a \"title\"",
                    msg
                )
            }
            AppError::Style(msg) => {
                let names = style_names().join(", ");
                write!(f, "{}\n  available styles: {}", msg, names)
            }
            AppError::RecordIndex(msg) => {
                write!(f, "{}\n  hint: --record counts from 1", msg)
            }
            AppError::Clipboard(msg) => {
                write!(
                    f,
                    "{}\n  hint: a graphical session is needed to reach the system clipboard",
                    msg
                )
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Format {
            input,
            style,
            record,
            json,
            output,
        } => {
            format_command(&input, &style, record, json, output.as_deref())?;
        }
        Commands::Copy {
            input,
            style,
            record,
        } => {
            copy_command(&input, &style, record)?;
        }
        Commands::Styles => {
            styles_command();
        }
    }

    Ok(())
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Print citations for the records in a file.
fn format_command(
    input: &Path,
    style_args: &[String],
    record: Option<usize>,
    json: bool,
    output: Option<&Path>,
) -> Result<(), AppError> {
    // 1. Resolve styles before touching the input
    let styles = resolve_styles(style_args)?;

    // 2. Load records, optionally narrowing to one
    let records = read_records(input)?;
    let records = match record {
        Some(n) => vec![pick_record(records, n)?],
        None => records,
    };

    // 3. Format
    let formatted: Vec<FormattedRecord> = records
        .iter()
        .map(|r| FormattedRecord::new(r, &styles))
        .collect();
    debug!(records = formatted.len(), styles = styles.len(), "formatted records");

    // 4. Render
    let result = if json {
        render_json(&formatted).map_err(|e| AppError::OutputFile(format!("json: {}", e)))?
    } else {
        render_text(&formatted)
    };

    // 5. Write to file or stdout
    if let Some(output_path) = output {
        fs::write(output_path, &result).map_err(|e| {
            AppError::OutputFile(format!("'{}': {}", output_path.display(), e))
        })?;
        eprintln!(
            "formatted {} record(s), wrote {}",
            formatted.len(),
            output_path.display()
        );
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{}", result)
            .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
    }

    Ok(())
}

/// Copy one record's citation in one style to the clipboard.
fn copy_command(input: &Path, style_arg: &str, record: usize) -> Result<(), AppError> {
    let style: CitationStyle = style_arg
        .parse()
        .map_err(|e| AppError::Style(format!("{}", e)))?;

    let record = pick_record(read_records(input)?, record)?;
    let text = format_citation(style, &record);

    let mut copier = CitationCopier::new(SystemClipboard::new());
    let notification = copier.copy(style, &text);

    if !notification.is_success() {
        return Err(AppError::Clipboard(notification.message));
    }

    eprintln!("{}", notification);
    println!("{}", text);
    Ok(())
}

/// List available citation styles.
fn styles_command() {
    for name in style_names() {
        println!("{}", name);
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reads records from a file, or from stdin when the path is '-'.
fn read_records(input: &Path) -> Result<Vec<BibliographicRecord>, AppError> {
    let content = if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| AppError::InputFile(format!("failed to read from stdin: {}", e)))?;
        buf
    } else {
        fs::read_to_string(input)
            .map_err(|e| AppError::InputFile(format!("'{}': {}", input.display(), e)))?
    };

    parse_records(&content).map_err(|e| match e {
        RecordError::IoError(_) => AppError::InputFile(format!("'{}': {}", input.display(), e)),
        _ => AppError::RecordData(format!("'{}': {}", input.display(), e)),
    })
}

/// Takes the N-th (1-based) record.
fn pick_record(
    records: Vec<BibliographicRecord>,
    n: usize,
) -> Result<BibliographicRecord, AppError> {
    let count = records.len();
    n.checked_sub(1)
        .and_then(|index| records.into_iter().nth(index))
        .ok_or_else(|| {
            AppError::RecordIndex(format!(
                "record {} requested but the input holds {} record(s)",
                n, count
            ))
        })
}

/// Parses `--style` arguments; none means every style.
fn resolve_styles(args: &[String]) -> Result<Vec<CitationStyle>, AppError> {
    if args.is_empty() {
        return Ok(CitationStyle::ALL.to_vec());
    }

    args.iter()
        .map(|arg| {
            arg.parse::<CitationStyle>()
                .map_err(|e| AppError::Style(format!("{}", e)))
        })
        .collect()
}
