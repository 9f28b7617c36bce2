//! Content-aware strategy (spec §4.5(c)): groups top-level children into
//! buckets by local name, then greedily packs each bucket's members into
//! chunks bounded by `max_chunk_size`.

use super::sliding_window;
use crate::datamodel::{estimate_tokens, Chunk, ChunkingConfig};
use crate::handlers::support::{child_elements, element_path, local_name, local_names_in, serialize};
use roxmltree::Node;
use serde_json::json;
use std::collections::HashMap;

/// Bucket top-level children by local name (first-appearance order), then
/// greedily pack each bucket into `max_chunk_size`-bounded chunks, in bucket
/// order and document order within a bucket.
pub fn content_aware(root: Node, document_type: &str, config: &ChunkingConfig) -> Vec<Chunk> {
    let children = child_elements(root);
    if children.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<&str> = Vec::new();
    let mut buckets: HashMap<&str, Vec<Node>> = HashMap::new();
    for child in &children {
        let name = local_name(*child);
        buckets.entry(name).or_insert_with(|| {
            order.push(name);
            Vec::new()
        }).push(*child);
    }

    let mut chunks = Vec::new();
    for name in order {
        let members = &buckets[name];
        pack_bucket(name, members, config, &mut chunks);
    }

    stamp(&mut chunks, document_type);
    chunks
}

fn pack_bucket(bucket_name: &str, members: &[Node], config: &ChunkingConfig, out: &mut Vec<Chunk>) {
    let mut current: Vec<Node> = Vec::new();
    let mut current_serialized = String::new();
    let mut current_tokens = 0usize;

    for member in members {
        let serialized = serialize(*member);
        let tokens = estimate_tokens(&serialized);

        if tokens > config.max_chunk_size && current.is_empty() {
            out.extend(sliding_window::slide(&serialized, &element_path(*member), config));
            continue;
        }

        if current_tokens + tokens > config.max_chunk_size && !current.is_empty() {
            out.push(make_chunk(bucket_name, &current, &current_serialized, current_tokens, out.len()));
            current = Vec::new();
            current_serialized = String::new();
            current_tokens = 0;
        }

        current.push(*member);
        current_serialized.push_str(&serialized);
        current_tokens += tokens;
    }

    if !current.is_empty() {
        out.push(make_chunk(bucket_name, &current, &current_serialized, current_tokens, out.len()));
    }
}

fn make_chunk(bucket_name: &str, members: &[Node], content: &str, token_estimate: usize, index: usize) -> Chunk {
    let mut metadata = HashMap::new();
    metadata.insert("strategy".to_string(), json!("content_aware"));
    metadata.insert("content_type".to_string(), json!(bucket_name));

    let elements_included = members.iter().flat_map(|n| local_names_in(*n)).collect();
    let element_path = members.first().map(|n| element_path(*n)).unwrap_or_default();

    Chunk {
        chunk_id: format!("ca-{bucket_name}-{index}"),
        content: content.to_string(),
        element_path,
        start_line: None,
        end_line: None,
        elements_included,
        token_estimate,
        metadata,
        parent_context: None,
    }
}

fn stamp(chunks: &mut [Chunk], document_type: &str) {
    let total = chunks.len();
    for (index, chunk) in chunks.iter_mut().enumerate() {
        chunk.metadata.insert("chunk_index".to_string(), json!(index));
        chunk.metadata.insert("total_chunks".to_string(), json!(total));
        chunk.metadata.insert("document_type".to_string(), json!(document_type));
    }
}
