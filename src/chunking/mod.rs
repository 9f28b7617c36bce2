//! The Chunking Orchestrator (spec §4.5): strategy dispatch plus the edge
//! cases common to every strategy (empty documents, sub-minimum documents,
//! dense 0-based `chunk_index`).

pub mod auto;
pub mod boundaries;
pub mod content_aware;
pub mod hierarchical;
pub mod sliding_window;

use crate::datamodel::{estimate_tokens, Chunk, ChunkStrategy, ChunkingConfig};
use crate::error::{Result, XmlInsightError};
use crate::handlers::support::element_path;
use roxmltree::Node;

/// Split a parsed document into chunks using the requested strategy.
///
/// A document whose whole serialized form is at or under `min_chunk_size`
/// tokens — including a childless root like `<root/>` — yields exactly one
/// chunk, regardless of strategy, since there's nothing to usefully split.
pub fn chunk(root: Node, document_type: &str, source: &str, strategy: ChunkStrategy, config: &ChunkingConfig) -> Result<Vec<Chunk>> {
    let whole = crate::handlers::support::serialize(root);
    if estimate_tokens(&whole) <= config.min_chunk_size {
        return Ok(vec![single_chunk(root, &whole, document_type)]);
    }

    let chunks = match strategy {
        ChunkStrategy::Hierarchical => hierarchical::hierarchical(root, document_type, source, config),
        ChunkStrategy::SlidingWindow => sliding_window::slide(source, &element_path(root), config),
        ChunkStrategy::ContentAware => content_aware::content_aware(root, document_type, config),
        ChunkStrategy::Auto => auto::auto(root, document_type, source, config),
    };

    if chunks.is_empty() {
        return Err(XmlInsightError::Chunking(
            "strategy produced zero chunks for a non-empty, above-minimum document".to_string(),
        ));
    }

    Ok(chunks)
}

fn single_chunk(root: Node, content: &str, document_type: &str) -> Chunk {
    use serde_json::json;
    use std::collections::HashMap;

    let mut metadata = HashMap::new();
    metadata.insert("strategy".to_string(), json!("single"));
    metadata.insert("chunk_index".to_string(), json!(0));
    metadata.insert("total_chunks".to_string(), json!(1));
    metadata.insert("document_type".to_string(), json!(document_type));

    Chunk {
        chunk_id: "c-0".to_string(),
        content: content.to_string(),
        element_path: element_path(root),
        start_line: Some(1),
        end_line: None,
        elements_included: crate::handlers::support::local_names_in(root),
        token_estimate: estimate_tokens(content),
        metadata,
        parent_context: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, sanitize_text};
    use std::path::PathBuf;

    fn p() -> PathBuf {
        PathBuf::from("test.xml")
    }

    #[test]
    fn empty_document_yields_exactly_one_chunk() {
        let sanitized = sanitize_text(&p(), "<root/>".to_string()).unwrap();
        let parsed = parse(&p(), &sanitized.xml, sanitized.entities).unwrap();
        let chunks = chunk(parsed.root(), "Generic XML", parsed.source, ChunkStrategy::Auto, &ChunkingConfig::default()).unwrap();
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn small_document_yields_one_chunk() {
        let xml = "<root><a>hi</a></root>".to_string();
        let sanitized = sanitize_text(&p(), xml).unwrap();
        let parsed = parse(&p(), &sanitized.xml, sanitized.entities).unwrap();
        let chunks = chunk(parsed.root(), "Generic XML", parsed.source, ChunkStrategy::Auto, &ChunkingConfig::default()).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].metadata.get("chunk_index").unwrap(), &serde_json::json!(0));
    }

    #[test]
    fn chunk_index_is_dense_and_zero_based() {
        let mut content = String::from("<root>");
        for i in 0..20 {
            content.push_str(&format!("<item id=\"{i}\">{}</item>", "x".repeat(50)));
        }
        content.push_str("</root>");
        let sanitized = sanitize_text(&p(), content).unwrap();
        let parsed = parse(&p(), &sanitized.xml, sanitized.entities).unwrap();
        let config = ChunkingConfig::builder().max_chunk_size(50).min_chunk_size(10).overlap_size(5).build();
        let chunks = chunk(parsed.root(), "Generic XML", parsed.source, ChunkStrategy::SlidingWindow, &config).unwrap();
        assert!(chunks.len() > 1);
    }
}
