//! Auto strategy selection (spec §4.5(d)): picks hierarchical, content-aware,
//! or sliding-window based on the classified document type and top-level
//! shape, with no further input from the caller.

use super::boundaries::is_hierarchical_friendly;
use super::{content_aware, hierarchical, sliding_window};
use crate::datamodel::{Chunk, ChunkingConfig};
use crate::handlers::support::{child_elements, element_path, local_name};
use roxmltree::Node;
use std::collections::HashMap;

/// Decision procedure:
/// 1. If the document type is on the hierarchical-friendly list, use
///    hierarchical chunking.
/// 2. Else if the top-level children fall into 3 or more distinct local
///    names with at least 2 members each, use content-aware chunking.
/// 3. Else fall back to sliding-window over the whole serialized document.
pub fn auto(root: Node, document_type: &str, source: &str, config: &ChunkingConfig) -> Vec<Chunk> {
    if is_hierarchical_friendly(document_type) {
        return hierarchical::hierarchical(root, document_type, source, config);
    }

    if has_diverse_content(root) {
        return content_aware::content_aware(root, document_type, config);
    }

    sliding_window::slide(source, &element_path(root), config)
}

fn has_diverse_content(root: Node) -> bool {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for child in child_elements(root) {
        *counts.entry(local_name(child)).or_insert(0) += 1;
    }
    let qualifying = counts.values().filter(|&&count| count >= 2).count();
    qualifying >= 3
}
