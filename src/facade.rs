//! The three façade functions (spec §6): `analyze`, `analyze_schema`, and
//! `chunk`. Implementations are intentionally thin — safe-parse, dispatch
//! (or not), and orchestrate — the contracts live in the modules they call.

use crate::chunking;
use crate::datamodel::{Chunk, ChunkStrategy, ChunkingConfig};
use crate::dispatch;
use crate::error::Result;
use crate::handlers::HandlerRegistry;
use crate::handlers::support::{local_name, local_names_in, max_depth};
use crate::parser::{self, ParsedDocument};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Safe-parse `path` and run it through the handler dispatch engine.
pub fn analyze(path: &Path) -> Result<crate::datamodel::SpecializedAnalysis> {
    analyze_with(path, None, &HandlerRegistry::with_default_handlers())
}

/// As [`analyze`], but with an explicit file-size ceiling and handler
/// registry, for callers that don't want the defaults.
pub fn analyze_with(
    path: &Path,
    max_bytes: Option<u64>,
    registry: &HandlerRegistry,
) -> Result<crate::datamodel::SpecializedAnalysis> {
    let sanitized = parser::read_and_sanitize(path, max_bytes)?;
    let parsed = parser::parse(path, &sanitized.xml, sanitized.entities)?;
    dispatch::dispatch(registry, &parsed, path)
}

/// Parse-only structural summary; no handler dispatch runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaSummary {
    pub root_element: String,
    pub total_elements: usize,
    pub max_depth: usize,
    pub unique_tags: Vec<String>,
    pub tag_counts: HashMap<String, u64>,
}

/// Safe-parse `path` and report its shape without running any handler.
pub fn analyze_schema(path: &Path) -> Result<SchemaSummary> {
    analyze_schema_with(path, None)
}

pub fn analyze_schema_with(path: &Path, max_bytes: Option<u64>) -> Result<SchemaSummary> {
    let sanitized = parser::read_and_sanitize(path, max_bytes)?;
    let parsed = parser::parse(path, &sanitized.xml, sanitized.entities)?;
    Ok(schema_summary(&parsed))
}

fn schema_summary(parsed: &ParsedDocument) -> SchemaSummary {
    let root = parsed.root();
    let names = local_names_in(root);

    let mut tag_counts: HashMap<String, u64> = HashMap::new();
    for name in &names {
        *tag_counts.entry(name.clone()).or_insert(0) += 1;
    }

    let mut unique_tags: Vec<String> = tag_counts.keys().cloned().collect();
    unique_tags.sort();

    SchemaSummary {
        root_element: local_name(root).to_string(),
        total_elements: names.len(),
        max_depth: max_depth(root),
        unique_tags,
        tag_counts,
    }
}

/// Analyze `path`, then carve it into chunks using `strategy` and `config`.
pub fn chunk(path: &Path, strategy: ChunkStrategy, config: &ChunkingConfig) -> Result<Vec<Chunk>> {
    chunk_with(path, strategy, config, None, &HandlerRegistry::with_default_handlers())
}

pub fn chunk_with(
    path: &Path,
    strategy: ChunkStrategy,
    config: &ChunkingConfig,
    max_bytes: Option<u64>,
    registry: &HandlerRegistry,
) -> Result<Vec<Chunk>> {
    let sanitized = parser::read_and_sanitize(path, max_bytes)?;
    let parsed = parser::parse(path, &sanitized.xml, sanitized.entities)?;
    let analysis = dispatch::dispatch(registry, &parsed, path)?;
    chunking::chunk(parsed.root(), &analysis.doc_type.type_name, parsed.source, strategy, config)
}
