//! Sliding-window token math over a large flat document (spec §4.5(b),
//! §8 scenario 6). Window/step sizes are computed in characters via the
//! `CHARS_PER_TOKEN = 4` heuristic, so a ~10,000-token document is built as
//! ~40,000 characters of filler text.

use std::io::Write;
use tempfile::NamedTempFile;
use xml_insight::datamodel::{ChunkStrategy, ChunkingConfig};
use xml_insight::facade::chunk;

#[test]
fn sliding_window_produces_expected_token_math() {
    let body = "lorem ipsum dolor sit amet consectetur adipiscing elit ".repeat(700);
    let xml = format!(r#"<?xml version="1.0" encoding="UTF-8"?><flat>{body}</flat>"#);

    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(xml.as_bytes()).expect("write fixture");

    let config = ChunkingConfig::builder().max_chunk_size(2000).min_chunk_size(200).overlap_size(200).build();
    let chunks = chunk(file.path(), ChunkStrategy::SlidingWindow, &config).expect("chunking should succeed");

    assert!(!chunks.is_empty());

    let expected = (body.len() as f64 / 4.0 / 1800.0).ceil() as usize;
    assert!(
        chunks.len().abs_diff(expected) <= 1,
        "expected roughly {expected} chunks, got {}",
        chunks.len()
    );

    for c in &chunks[..chunks.len() - 1] {
        assert!(
            (1800..=2100).contains(&c.token_estimate),
            "non-final chunk token_estimate was {}",
            c.token_estimate
        );
    }

    for (index, c) in chunks.iter().enumerate() {
        assert_eq!(c.metadata["chunk_index"], index);
    }
    let last = chunks.last().unwrap();
    assert_eq!(last.metadata["chunk_index"], chunks.len() - 1);
}
