//! Core data model: classification verdicts, analysis reports, and chunks.

pub mod analysis;
pub mod chunk;
pub mod document_type;

pub use analysis::SpecializedAnalysis;
pub use chunk::{estimate_tokens, Chunk, ChunkStrategy, ChunkingConfig, ChunkingConfigBuilder};
pub use document_type::DocumentTypeInfo;
