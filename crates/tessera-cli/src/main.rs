//! Tessera command-line front end.
//!
//! Usage:
//!   # Fallback proposal for a request
//!   tessera fallback --request-id FA301625Q0050 --counterparty-id gunn > doc.json
//!
//!   # Load a generated document, falling back if it is unusable
//!   tessera generate --from generated.json --request-id FA301625Q0050
//!
//!   # Edit, then export
//!   tessera edit doc.json --op "move 3 1" --op "set block_4 field:company_name Gunn LLC"
//!   tessera export doc.json --out proposal.txt
//!
//! Logs go to stderr; documents and exports go to stdout unless `--out` is given.

mod config;
mod ops;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use tessera_doc::{Document, EditSession, export};
use tessera_gen::{GenerationRequest, JsonFileSource, fallback_document, generate_or_fallback};

use crate::config::{ExportConfig, TesseraConfig};
use crate::ops::EditOp;

/// Generate, edit, and export block documents.
#[derive(Parser, Debug)]
#[command(name = "tessera")]
#[command(about = "Generate, edit, and export block documents")]
struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/tessera/config.ron)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct RequestArgs {
    /// Upstream request id (default from config; empty matches any)
    #[arg(long)]
    request_id: Option<String>,

    /// Counterparty id (default from config; empty matches any)
    #[arg(long)]
    counterparty_id: Option<String>,
}

impl RequestArgs {
    fn resolve(&self, config: &TesseraConfig) -> GenerationRequest {
        GenerationRequest::new(
            self.request_id
                .clone()
                .unwrap_or_else(|| config.generation.request_id.clone()),
            self.counterparty_id
                .clone()
                .unwrap_or_else(|| config.generation.counterparty_id.clone()),
        )
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the fallback document as JSON
    Fallback {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Load a generated document, substituting the fallback on failure
    Generate {
        /// JSON document produced by a generator
        #[arg(long)]
        from: PathBuf,

        #[command(flatten)]
        request: RequestArgs,
    },

    /// Validate a document and summarize its blocks
    Check {
        file: PathBuf,
    },

    /// Render a document as plain text
    Export {
        file: PathBuf,

        /// Write to this file, or into this directory under a name derived
        /// from the title, instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Split output into pages of N lines
        #[arg(long)]
        page_lines: Option<usize>,

        /// Omit the title/date header
        #[arg(long)]
        no_header: bool,
    },

    /// Apply edit operations and print the resulting JSON
    Edit {
        file: PathBuf,

        /// Operation, repeatable: "add h2", "delete <id>", "move 2 0",
        /// "set <id> content|title|field:<fid> <text>", "status review", "title <text>"
        #[arg(long = "op", required = true)]
        ops: Vec<String>,

        /// Write JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = TesseraConfig::load(args.config.as_deref())?;

    match args.command {
        Command::Fallback { request } => {
            let doc = fallback_document(&request.resolve(&config))?;
            println!("{}", doc.to_json_pretty()?);
        }
        Command::Generate { from, request } => {
            let source = JsonFileSource::new(from);
            let doc = generate_or_fallback(&source, &request.resolve(&config)).await?;
            println!("{}", doc.to_json_pretty()?);
        }
        Command::Check { file } => {
            let doc = load_document(&file).await?;
            println!(
                "{} ({} blocks, status {}, v{})",
                doc.title(),
                doc.len(),
                doc.status(),
                doc.version()
            );
            for block in doc.blocks() {
                let summary = match block.content.text() {
                    Some(text) => text.to_string(),
                    None => {
                        let missing = block.content.fields().iter().filter(|f| f.is_missing()).count();
                        format!("{} fields, {missing} required missing", block.content.fields().len())
                    }
                };
                println!("{:>3} {:<4} {:<24} {summary}", block.order, block.kind().as_str(), block.id.as_str());
            }
        }
        Command::Export {
            file,
            out,
            page_lines,
            no_header,
        } => {
            let doc = load_document(&file).await?;
            let text = render_export(&doc, &config.export, page_lines, no_header);

            match out {
                Some(out) => {
                    let path = export_path(out, doc.title()).await;
                    tokio::fs::write(&path, &text)
                        .await
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), bytes = text.len(), "exported");
                }
                None => print!("{text}"),
            }
        }
        Command::Edit { file, ops, out } => {
            let mut doc = load_document(&file).await?;
            let parsed = ops
                .iter()
                .map(|s| s.parse::<EditOp>().with_context(|| format!("bad --op {s:?}")))
                .collect::<Result<Vec<_>>>()?;

            let mut session = EditSession::new();
            for op in &parsed {
                ops::apply(&mut doc, &mut session, op).with_context(|| format!("{op:?} failed"))?;
                tracing::debug!(?op, version = doc.version(), "applied");
            }

            let json = doc.to_json_pretty()?;
            match out {
                Some(path) => tokio::fs::write(&path, json)
                    .await
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}

/// Export text with CLI overrides applied over the configured options.
/// Pages are separated by a form feed.
fn render_export(
    doc: &Document,
    config: &ExportConfig,
    page_lines: Option<usize>,
    no_header: bool,
) -> String {
    let mut options = config.options();
    if no_header {
        options.include_header = false;
    }
    let lines = export::export_with(doc, &options);

    match page_lines.or(config.page_lines) {
        Some(n) => export::paginate(&lines, n)
            .iter()
            .map(|page| export::render_text(page))
            .collect::<Vec<_>>()
            .join("\u{000C}"),
        None => export::render_text(&lines),
    }
}

/// Resolve `--out`: an existing directory gets a file named after the title.
async fn export_path(out: PathBuf, title: &str) -> PathBuf {
    let is_dir = tokio::fs::metadata(&out).await.is_ok_and(|m| m.is_dir());
    if is_dir {
        out.join(export::export_file_name(title))
    } else {
        out
    }
}

async fn load_document(path: &Path) -> Result<Document> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    Document::from_json(&json).with_context(|| format!("invalid document {}", path.display()))
}
