//! Hierarchical chunking of a DocBook document (spec §4.5(a), §8 scenario 5).

use std::io::Write;
use tempfile::NamedTempFile;
use xml_insight::datamodel::{ChunkStrategy, ChunkingConfig};
use xml_insight::facade::chunk;

#[test]
fn docbook_chapters_become_chunks_with_book_parent_context() {
    let mut chapters = String::new();
    for i in 1..=5 {
        let filler = "Body text padding so each chapter comfortably exceeds the minimum chunk size. ".repeat(10);
        chapters.push_str(&format!("<chapter><title>Chapter {i}</title><para>Body of chapter {i}. {filler}</para></chapter>"));
    }
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><book xmlns="http://docbook.org/ns/docbook"><title>Example Book</title>{chapters}</book>"#
    );

    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(xml.as_bytes()).expect("write fixture");

    let config = ChunkingConfig::builder().min_chunk_size(1).build();
    let chunks = chunk(file.path(), ChunkStrategy::Hierarchical, &config).expect("chunking should succeed");

    assert!(chunks.len() >= 5, "expected at least 5 chunks, got {}", chunks.len());

    let chapter_chunks: Vec<_> = chunks.iter().filter(|c| c.element_path.ends_with("chapter")).collect();
    assert_eq!(chapter_chunks.len(), 5);

    for (index, c) in chapter_chunks.iter().enumerate() {
        assert!(c.content.contains(&format!("Chapter {}", index + 1)));
        let parent_context = c.parent_context.as_deref().unwrap_or("");
        assert!(parent_context.contains("<book"), "parent_context was {parent_context:?}");
    }

    for window in chapter_chunks.windows(2) {
        assert!(window[0].content.contains("Chapter"));
        assert!(window[1].content.contains("Chapter"));
    }
}

#[test]
fn oversized_leaf_root_is_flagged_not_split() {
    let huge_text = "x".repeat(20_000);
    let xml = format!(r#"<?xml version="1.0" encoding="UTF-8"?><huge>{huge_text}</huge>"#);

    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(xml.as_bytes()).expect("write fixture");

    let config = ChunkingConfig::builder().max_chunk_size(100).min_chunk_size(10).overlap_size(10).build();
    let chunks = chunk(file.path(), ChunkStrategy::Hierarchical, &config).expect("chunking should succeed");

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].metadata.get("oversized"), Some(&serde_json::json!(true)));
}
