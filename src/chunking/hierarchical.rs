//! Hierarchical strategy (spec §4.5(a)): depth-first walk over a
//! per-document-type semantic-boundary whitelist, recursing into oversized
//! boundary elements and falling back to sliding-window when no finer
//! boundary exists.

use super::boundaries;
use super::sliding_window;
use crate::datamodel::{estimate_tokens, Chunk, ChunkingConfig};
use crate::handlers::support::{child_elements, element_path, local_name, local_names_in, opening_tag, serialize};
use roxmltree::Node;
use serde_json::json;
use std::collections::HashMap;

pub fn hierarchical(root: Node, document_type: &str, source: &str, config: &ChunkingConfig) -> Vec<Chunk> {
    let boundary_set = boundaries::boundary_set_for(document_type);
    let mut chunks = Vec::new();
    walk(root, &boundary_set, config, source, &mut chunks, true);

    if chunks.is_empty() {
        let serialized = serialize(root);
        let estimate = estimate_tokens(&serialized);
        if estimate <= config.min_chunk_size {
            chunks.push(make_chunk(root, &serialized, estimate, false, source, config));
        } else if child_elements(root).is_empty() {
            let mut c = make_chunk(root, &serialized, estimate, false, source, config);
            c.metadata.insert("oversized".to_string(), json!(true));
            chunks.push(c);
        } else {
            chunks = sliding_window::slide(&serialized, &element_path(root), config);
        }
    }

    stamp(&mut chunks, document_type);
    chunks
}

fn walk(node: Node, boundary_set: &[&str], config: &ChunkingConfig, source: &str, out: &mut Vec<Chunk>, is_root: bool) {
    if !is_root && boundary_set.contains(&local_name(node)) {
        emit_boundary(node, boundary_set, config, source, out);
        return;
    }
    for child in child_elements(node) {
        walk(child, boundary_set, config, source, out, false);
    }
}

fn emit_boundary(node: Node, boundary_set: &[&str], config: &ChunkingConfig, source: &str, out: &mut Vec<Chunk>) {
    let serialized = serialize(node);
    let estimate = estimate_tokens(&serialized);

    if estimate <= config.max_chunk_size {
        out.push(make_chunk(node, &serialized, estimate, false, source, config));
        return;
    }

    let children: Vec<Node> = child_elements(node);
    let finer: Vec<Node> = children.into_iter().filter(|c| contains_boundary(*c, boundary_set)).collect();

    if !finer.is_empty() {
        for child in finer {
            walk(child, boundary_set, config, source, out, false);
        }
        return;
    }

    if child_elements(node).is_empty() {
        let mut chunk = make_chunk(node, &serialized, estimate, false, source, config);
        chunk.metadata.insert("oversized".to_string(), json!(true));
        out.push(chunk);
    } else {
        out.extend(sliding_window::slide(&serialized, &element_path(node), config));
    }
}

fn contains_boundary(node: Node, boundary_set: &[&str]) -> bool {
    boundary_set.contains(&local_name(node)) || node.descendants().any(|n| n.is_element() && boundary_set.contains(&local_name(n)))
}

fn make_chunk(node: Node, content: &str, token_estimate: usize, oversized: bool, source: &str, config: &ChunkingConfig) -> Chunk {
    let path = element_path(node);
    let parent_context = if config.preserve_hierarchy {
        Some(
            node.ancestors()
                .filter(|n| n.is_element())
                .map(opening_tag)
                .collect::<Vec<_>>()
                .join(""),
        )
    } else {
        None
    };

    let mut metadata = HashMap::new();
    metadata.insert("strategy".to_string(), json!("hierarchical"));
    if oversized {
        metadata.insert("oversized".to_string(), json!(true));
    }

    let (start_line, end_line) = line_range(node, source);

    Chunk {
        chunk_id: format!("h-{}-{}", local_name(node), node.range().start),
        content: content.to_string(),
        element_path: path,
        start_line,
        end_line,
        elements_included: local_names_in(node),
        token_estimate,
        metadata,
        parent_context,
    }
}

fn line_range(node: Node, source: &str) -> (Option<usize>, Option<usize>) {
    let range = node.range();
    let start = line_of(source, range.start);
    let end = line_of(source, range.end.min(source.len()));
    (Some(start), Some(end))
}

fn line_of(text: &str, byte_offset: usize) -> usize {
    1 + text.as_bytes()[..byte_offset.min(text.len())].iter().filter(|b| **b == b'\n').count()
}

fn stamp(chunks: &mut [Chunk], document_type: &str) {
    let total = chunks.len();
    for (index, chunk) in chunks.iter_mut().enumerate() {
        chunk.metadata.insert("chunk_index".to_string(), json!(index));
        chunk.metadata.insert("total_chunks".to_string(), json!(total));
        chunk.metadata.insert("document_type".to_string(), json!(document_type));
    }
}
