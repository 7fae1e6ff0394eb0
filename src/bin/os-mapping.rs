//! OpenSearch Mapping CLI
//!
//! Command-line helpers for canonicalizing JSON and building bulk bodies.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use opensearch_mapping::{
    build_bulk_body, load_documents, load_json, BulkItem, CompactJsonFormatter,
    IndentJsonFormatter, JsonFormatter,
};
use serde_json::Value;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "os-mapping")]
#[command(about = "OpenSearch mapping and bulk body helpers")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Canonicalize a JSON file: sorted keys, 3-space indentation
    Format {
        /// JSON file to format
        file: PathBuf,

        /// Emit a single line instead of indenting
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Build a bulk index body from newline-delimited JSON documents
    Bulk {
        /// NDJSON file, one document per line
        file: PathBuf,

        /// Destination index
        #[arg(long)]
        index: String,

        /// Document field holding the _id
        #[arg(long, default_value = "id")]
        id_field: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Format {
            file,
            compact,
            output,
        } => run_format(&file, compact, output.as_deref()),

        Commands::Bulk {
            file,
            index,
            id_field,
            output,
        } => run_bulk(&file, &index, &id_field, output.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: cannot install logger: {}", e);
    }
}

fn run_format(file: &Path, compact: bool, output: Option<&Path>) -> Result<(), u8> {
    let value = load_json(file).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let raw = serde_json::to_vec(&value).map_err(|e| {
        eprintln!("Error serializing input: {}", e);
        2u8
    })?;

    let formatted = if compact {
        CompactJsonFormatter::new().format_json(&raw)
    } else {
        IndentJsonFormatter::new().format_json(&raw)
    }
    .map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let mut text = String::from_utf8_lossy(&formatted).into_owned();
    text.push('\n');
    write_output(output, &text)
}

fn run_bulk(file: &Path, index: &str, id_field: &str, output: Option<&Path>) -> Result<(), u8> {
    let documents = load_documents(file).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;
    debug!(count = documents.len(), index, "loaded documents");

    let mut items = Vec::with_capacity(documents.len());
    for (n, document) in documents.into_iter().enumerate() {
        let id = document_id(&document, id_field).ok_or_else(|| {
            eprintln!(
                "Error: document {} has no string or number field \"{}\"",
                n + 1,
                id_field
            );
            2u8
        })?;
        items.push(BulkItem::new(index, id, document));
    }

    let body = build_bulk_body(&items).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    write_output(output, &body)
}

/// Read the `_id` from a document field. Strings and numbers are accepted.
fn document_id(document: &Value, id_field: &str) -> Option<String> {
    match document.get(id_field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), u8> {
    match output {
        Some(path) => std::fs::write(path, content).map_err(|e| {
            eprintln!("Error writing to {}: {}", path.display(), e);
            3u8
        }),
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}
