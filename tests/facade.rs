//! The three façade functions (spec §6) and the boundary behaviors and
//! invariants from spec §8.

use std::io::Write;
use tempfile::NamedTempFile;
use xml_insight::datamodel::{ChunkStrategy, ChunkingConfig};
use xml_insight::error::XmlInsightError;
use xml_insight::facade::{analyze, analyze_schema, chunk};

fn write_fixture(xml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(xml.as_bytes()).expect("write fixture");
    file
}

#[test]
fn analyze_schema_reports_shape_without_dispatch() {
    let file = write_fixture(r#"<root><a/><a/><b><c/></b></root>"#);
    let summary = analyze_schema(file.path()).expect("schema analysis should succeed");

    assert_eq!(summary.root_element, "root");
    assert_eq!(summary.total_elements, 5);
    assert_eq!(summary.max_depth, 2);
    assert_eq!(*summary.tag_counts.get("a").unwrap(), 2);
}

#[test]
fn empty_document_yields_a_single_chunk_for_every_splitting_strategy() {
    let file = write_fixture("<root/>");
    for strategy in [ChunkStrategy::Hierarchical, ChunkStrategy::SlidingWindow] {
        let chunks = chunk(file.path(), strategy, &ChunkingConfig::default()).expect("chunking should succeed");
        assert_eq!(chunks.len(), 1, "strategy {strategy:?} produced {} chunks", chunks.len());
    }

    let analysis = analyze(file.path()).expect("analyze should succeed");
    assert!(analysis.data_inventory.values().all(|&v| v == 0));
}

#[test]
fn external_doctype_is_rejected() {
    let xml = r#"<!DOCTYPE root SYSTEM "http://evil.example/evil.dtd"><root/>"#;
    let file = write_fixture(xml);

    let err = analyze(file.path()).unwrap_err();
    match err {
        XmlInsightError::Parse { kind, .. } => {
            assert_eq!(kind.to_string(), "unsafe-entity");
        }
        other => panic!("expected a Parse error, got {other:?}"),
    }
}

#[test]
fn billion_laughs_is_rejected() {
    let xml = r#"<!DOCTYPE lolz [
  <!ENTITY lol "lol">
  <!ENTITY lol2 "&lol;&lol;&lol;&lol;&lol;&lol;&lol;&lol;&lol;&lol;">
  <!ENTITY lol3 "&lol2;&lol2;&lol2;&lol2;&lol2;&lol2;&lol2;&lol2;&lol2;&lol2;">
]>
<lolz>&lol3;</lolz>"#;
    let file = write_fixture(xml);

    let err = analyze(file.path()).unwrap_err();
    match err {
        XmlInsightError::Parse { kind, .. } => {
            assert_eq!(kind.to_string(), "xml-bomb");
        }
        other => panic!("expected a Parse error, got {other:?}"),
    }
}

#[test]
fn s1000d_mixed_entities_keeps_only_safe_ones() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?><!DOCTYPE dmodule  [
  <!ENTITY ICN-C0419-S1000D0379-001-01 SYSTEM "ICN-C0419-S1000D0379-001-01.CGM" NDATA cgm >
  <!ENTITY dangerous SYSTEM "file:///etc/passwd" NDATA txt >
]>
<dmodule><content>Reference to &ICN-C0419-S1000D0379-001-01; graphic</content></dmodule>"#;
    let file = write_fixture(xml);

    let analysis = analyze(file.path()).expect("S1000D document should parse successfully");
    let extracted = analysis.doc_type.metadata.get("extracted_entities").expect("extracted_entities present");
    let names: Vec<String> = serde_json::from_value(extracted.clone()).expect("extracted_entities is a string list");

    assert_eq!(names, vec!["ICN-C0419-S1000D0379-001-01".to_string()]);
}

#[test]
fn analyze_is_deterministic_across_repeated_calls() {
    let file = write_fixture(r#"<rss version="2.0"><channel><title>t</title></channel></rss>"#);

    let first = analyze(file.path()).expect("first analyze should succeed");
    let second = analyze(file.path()).expect("second analyze should succeed");

    assert_eq!(first.as_flat_json(), second.as_flat_json());
}

#[test]
fn chunking_is_idempotent() {
    let file = write_fixture(r#"<root><a>one</a><b>two</b></root>"#);
    let config = ChunkingConfig::default();

    let first = chunk(file.path(), ChunkStrategy::Auto, &config).expect("first chunk call should succeed");
    let second = chunk(file.path(), ChunkStrategy::Auto, &config).expect("second chunk call should succeed");

    assert_eq!(serde_json::to_value(&first).unwrap(), serde_json::to_value(&second).unwrap());
}
