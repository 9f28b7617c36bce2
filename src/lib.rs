//! Domain-aware XML analysis and chunking engine.
//!
//! Classifies XML dialects via a pluggable handler registry, runs
//! domain-specific analysis, and carves documents into RAG-ready chunks.
//! See [`facade`] for the three entry points most callers need.

pub mod chunking;
pub mod datamodel;
pub mod dispatch;
pub mod error;
pub mod facade;
pub mod handlers;
pub mod parser;

pub use datamodel::{Chunk, ChunkStrategy, ChunkingConfig, DocumentTypeInfo, SpecializedAnalysis};
pub use error::{Result, XmlInsightError};
pub use facade::{analyze, analyze_schema, chunk, SchemaSummary};
pub use handlers::HandlerRegistry;
