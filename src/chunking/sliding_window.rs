//! Sliding-window strategy (spec §4.5(b)).
//!
//! Token counts are approximated from character counts via the same
//! `ceil(len/4)` heuristic as [`crate::datamodel::estimate_tokens`], so window
//! and step sizes are computed in characters (`tokens * 4`) and converted
//! back when stamping `token_estimate`.

use crate::datamodel::{estimate_tokens, Chunk, ChunkingConfig};
use serde_json::json;
use std::collections::HashMap;

const CHARS_PER_TOKEN: usize = 4;

/// Slide a window of `max_chunk_size` tokens, stepping by
/// `max_chunk_size - overlap_size`, over `content`. Window edges backtrack at
/// most `overlap_size / 2` tokens to the nearest `>` so chunks don't split
/// mid-tag.
pub fn slide(content: &str, element_path: &str, config: &ChunkingConfig) -> Vec<Chunk> {
    if content.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = content.chars().collect();
    let total = chars.len();

    let window_chars = config.max_chunk_size * CHARS_PER_TOKEN;
    let step_chars = config
        .max_chunk_size
        .saturating_sub(config.overlap_size)
        .max(1)
        * CHARS_PER_TOKEN;
    let backtrack_limit = (config.overlap_size / 2).max(1) * CHARS_PER_TOKEN;

    if total <= config.min_chunk_size * CHARS_PER_TOKEN {
        let text: String = chars.iter().collect();
        let estimate = estimate_tokens(&text);
        return vec![chunk_from(&text, element_path, 0, estimate)];
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;
    while start < total {
        let mut end = (start + window_chars).min(total);

        if end < total {
            end = backtrack_to_boundary(&chars, end, backtrack_limit);
        }
        if end <= start {
            end = (start + window_chars).min(total);
        }

        let text: String = chars[start..end].iter().collect();
        let estimate = estimate_tokens(&text);
        chunks.push(chunk_from(&text, element_path, chunks.len(), estimate));

        if end >= total {
            break;
        }
        start += step_chars;
        if start >= end {
            start = end;
        }
    }

    chunks
}

/// Search backward from `pos` (capped at `limit` chars) for the end of the
/// nearest `>` so a window boundary lands just after a closing tag.
fn backtrack_to_boundary(chars: &[char], pos: usize, limit: usize) -> usize {
    let floor = pos.saturating_sub(limit);
    for i in (floor..pos).rev() {
        if chars[i] == '>' {
            return i + 1;
        }
    }
    pos
}

fn chunk_from(content: &str, element_path: &str, index: usize, token_estimate: usize) -> Chunk {
    let mut metadata = HashMap::new();
    metadata.insert("strategy".to_string(), json!("sliding_window"));
    metadata.insert("chunk_index".to_string(), json!(index));

    Chunk {
        chunk_id: format!("sw-{index}"),
        content: content.to_string(),
        element_path: element_path.to_string(),
        start_line: None,
        end_line: None,
        elements_included: Vec::new(),
        token_estimate,
        metadata,
        parent_context: None,
    }
}
