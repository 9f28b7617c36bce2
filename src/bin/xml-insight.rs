//! xml-insight CLI binary
//!
//! Thin command-line front-end over the three façade functions. Carried
//! because the teacher ships a CLI over its library, not because the core
//! engine needs one — see `xml_insight::facade` for the actual contract.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use xml_insight::datamodel::{ChunkStrategy, ChunkingConfig};
use xml_insight::facade;

#[derive(Parser)]
#[command(name = "xml-insight", about = "Domain-aware XML analysis and chunking", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a document and print its analysis as JSON
    Analyze { path: PathBuf },
    /// Parse-only structural summary (no handler dispatch)
    Schema { path: PathBuf },
    /// Analyze and split a document into chunks
    Chunk {
        path: PathBuf,
        #[arg(long, default_value = "auto")]
        strategy: String,
        #[arg(long, default_value_t = ChunkingConfig::default().max_chunk_size)]
        max_chunk_size: usize,
        #[arg(long, default_value_t = ChunkingConfig::default().min_chunk_size)]
        min_chunk_size: usize,
        #[arg(long, default_value_t = ChunkingConfig::default().overlap_size)]
        overlap_size: usize,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                print!("{e}");
                process::exit(0);
            }
            eprintln!("{e}");
            process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Analyze { path } => {
            let analysis = facade::analyze(&path).with_context(|| format!("analyzing {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(&analysis.as_flat_json())?);
        }
        Command::Schema { path } => {
            let summary = facade::analyze_schema(&path).with_context(|| format!("reading schema of {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Chunk { path, strategy, max_chunk_size, min_chunk_size, overlap_size } => {
            let strategy = ChunkStrategy::parse(&strategy)
                .with_context(|| format!("unknown chunking strategy '{strategy}'"))?;
            let config = ChunkingConfig::builder()
                .max_chunk_size(max_chunk_size)
                .min_chunk_size(min_chunk_size)
                .overlap_size(overlap_size)
                .build();
            let chunks = facade::chunk(&path, strategy, &config).with_context(|| format!("chunking {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(&chunks)?);
        }
    }
    Ok(())
}
