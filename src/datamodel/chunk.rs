//! Addressable, size-bounded document fragments produced by the chunking
//! orchestrator.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One fragment of a chunked document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_id: String,
    pub content: String,
    /// Slash-separated path of element local names from root to anchor.
    pub element_path: String,
    pub start_line: Option<usize>,
    pub end_line: Option<usize>,
    pub elements_included: Vec<String>,
    pub token_estimate: usize,
    pub metadata: HashMap<String, Value>,
    pub parent_context: Option<String>,
}

/// Heuristic LLM token estimate, per spec §3: `ceil(len(content) / 4)`.
pub fn estimate_tokens(content: &str) -> usize {
    content.chars().count().div_ceil(4)
}

/// A chunking strategy name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkStrategy {
    Hierarchical,
    SlidingWindow,
    ContentAware,
    Auto,
}

impl ChunkStrategy {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "hierarchical" => Some(ChunkStrategy::Hierarchical),
            "sliding_window" | "sliding-window" => Some(ChunkStrategy::SlidingWindow),
            "content_aware" | "content-aware" => Some(ChunkStrategy::ContentAware),
            "auto" => Some(ChunkStrategy::Auto),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkStrategy::Hierarchical => "hierarchical",
            ChunkStrategy::SlidingWindow => "sliding_window",
            ChunkStrategy::ContentAware => "content_aware",
            ChunkStrategy::Auto => "auto",
        }
    }
}

/// Tunables recognized by every chunking strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    pub max_chunk_size: usize,
    pub min_chunk_size: usize,
    pub overlap_size: usize,
    pub preserve_hierarchy: bool,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 2000,
            min_chunk_size: 200,
            overlap_size: 100,
            preserve_hierarchy: true,
        }
    }
}

impl ChunkingConfig {
    pub fn builder() -> ChunkingConfigBuilder {
        ChunkingConfigBuilder::default()
    }
}

/// Builder for [`ChunkingConfig`], mirroring the teacher's
/// `HybridChunkerBuilder` pattern.
#[derive(Default)]
pub struct ChunkingConfigBuilder {
    config: ChunkingConfigPartial,
}

#[derive(Default)]
struct ChunkingConfigPartial {
    max_chunk_size: Option<usize>,
    min_chunk_size: Option<usize>,
    overlap_size: Option<usize>,
    preserve_hierarchy: Option<bool>,
}

impl ChunkingConfigBuilder {
    pub fn max_chunk_size(mut self, value: usize) -> Self {
        self.config.max_chunk_size = Some(value);
        self
    }

    pub fn min_chunk_size(mut self, value: usize) -> Self {
        self.config.min_chunk_size = Some(value);
        self
    }

    pub fn overlap_size(mut self, value: usize) -> Self {
        self.config.overlap_size = Some(value);
        self
    }

    pub fn preserve_hierarchy(mut self, value: bool) -> Self {
        self.config.preserve_hierarchy = Some(value);
        self
    }

    pub fn build(self) -> ChunkingConfig {
        let defaults = ChunkingConfig::default();
        ChunkingConfig {
            max_chunk_size: self.config.max_chunk_size.unwrap_or(defaults.max_chunk_size),
            min_chunk_size: self.config.min_chunk_size.unwrap_or(defaults.min_chunk_size),
            overlap_size: self.config.overlap_size.unwrap_or(defaults.overlap_size),
            preserve_hierarchy: self.config.preserve_hierarchy.unwrap_or(defaults.preserve_hierarchy),
        }
    }
}
