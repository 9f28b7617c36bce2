//! Content-aware chunking: bucketing by local name and auto-strategy
//! selection (spec §4.5(c), (d)).

use std::io::Write;
use tempfile::NamedTempFile;
use xml_insight::datamodel::{ChunkStrategy, ChunkingConfig};
use xml_insight::facade::chunk;

fn write_fixture(xml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(xml.as_bytes()).expect("write fixture");
    file
}

#[test]
fn content_aware_buckets_by_local_name_in_first_appearance_order() {
    let xml = r#"<root>
        <author>a1</author>
        <chapter>c1</chapter>
        <chapter>c2</chapter>
        <footnote>f1</footnote>
        <footnote>f2</footnote>
        <footnote>f3</footnote>
    </root>"#;
    let file = write_fixture(xml);
    let config = ChunkingConfig::builder().min_chunk_size(1).build();

    let chunks = chunk(file.path(), ChunkStrategy::ContentAware, &config).expect("chunking should succeed");

    let content_types: Vec<String> = chunks
        .iter()
        .map(|c| c.metadata["content_type"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(content_types, vec!["author", "chapter", "footnote"]);
}

#[test]
fn auto_selects_content_aware_for_diverse_flat_documents() {
    let xml = r#"<catalog>
        <book>b1</book><book>b2</book>
        <review>r1</review><review>r2</review>
        <tag>t1</tag><tag>t2</tag>
    </catalog>"#;
    let file = write_fixture(xml);
    let config = ChunkingConfig::builder().min_chunk_size(1).build();

    let chunks = chunk(file.path(), ChunkStrategy::Auto, &config).expect("chunking should succeed");

    assert!(chunks.iter().all(|c| c.metadata["strategy"] == "content_aware"));
}
