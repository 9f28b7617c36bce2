//! Handler Dispatch Engine behavior (spec §4.3): confidence arbitration,
//! registry-order tie-break, generic fallback, and panic containment.

use roxmltree::Node;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use xml_insight::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use xml_insight::error::Result;
use xml_insight::facade::analyze_with;
use xml_insight::handlers::{HandlerRegistry, XmlHandler};

struct FixedConfidence {
    handler_name: &'static str,
    confidence: f64,
}

impl XmlHandler for FixedConfidence {
    fn name(&self) -> &'static str {
        self.handler_name
    }

    fn can_handle(&self, _root: Node, _namespaces: &HashMap<String, String>) -> (bool, f64) {
        (true, self.confidence)
    }

    fn detect_type(&self, _root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        DocumentTypeInfo::new(self.handler_name, self.confidence)
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        Ok(SpecializedAnalysis::new(self.detect_type(root, &HashMap::new())).with_handler_used(self.name()))
    }

    fn extract_key_data(&self, _root: Node) -> HashMap<String, Value> {
        HashMap::new()
    }
}

struct PanicsOnProbe;

impl XmlHandler for PanicsOnProbe {
    fn name(&self) -> &'static str {
        "PanicsOnProbe"
    }

    fn can_handle(&self, _root: Node, _namespaces: &HashMap<String, String>) -> (bool, f64) {
        panic!("simulated can_handle failure");
    }

    fn detect_type(&self, _root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        DocumentTypeInfo::new("PanicsOnProbe", 1.0)
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        Ok(SpecializedAnalysis::new(self.detect_type(root, &HashMap::new())).with_handler_used(self.name()))
    }

    fn extract_key_data(&self, _root: Node) -> HashMap<String, Value> {
        HashMap::new()
    }
}

fn write_fixture(xml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(xml.as_bytes()).expect("write fixture");
    file
}

#[test]
fn highest_confidence_wins() {
    let registry = HandlerRegistry::new(vec![
        Box::new(FixedConfidence { handler_name: "Low", confidence: 0.4 }),
        Box::new(FixedConfidence { handler_name: "High", confidence: 0.9 }),
    ]);
    let file = write_fixture("<root/>");

    let analysis = analyze_with(file.path(), None, &registry).expect("analyze should succeed");
    assert_eq!(analysis.doc_type.metadata["handler_used"], "High");
}

#[test]
fn registry_order_breaks_ties() {
    let registry = HandlerRegistry::new(vec![
        Box::new(FixedConfidence { handler_name: "First", confidence: 0.7 }),
        Box::new(FixedConfidence { handler_name: "Second", confidence: 0.7 }),
    ]);
    let file = write_fixture("<root/>");

    let analysis = analyze_with(file.path(), None, &registry).expect("analyze should succeed");
    assert_eq!(analysis.doc_type.metadata["handler_used"], "First");
}

#[test]
fn below_threshold_candidates_are_ignored_in_favor_of_fallback() {
    let registry = HandlerRegistry::new(vec![Box::new(FixedConfidence { handler_name: "TooWeak", confidence: 0.1 })]);
    let file = write_fixture("<root/>");

    let analysis = analyze_with(file.path(), None, &registry).expect("analyze should succeed");
    assert_eq!(analysis.doc_type.metadata["handler_used"], "GenericHandler");
}

#[test]
fn panicking_can_handle_is_swallowed_and_does_not_win() {
    let registry = HandlerRegistry::new(vec![
        Box::new(PanicsOnProbe),
        Box::new(FixedConfidence { handler_name: "Stable", confidence: 0.5 }),
    ]);
    let file = write_fixture("<root/>");

    let analysis = analyze_with(file.path(), None, &registry).expect("analyze should succeed despite the panic");
    assert_eq!(analysis.doc_type.metadata["handler_used"], "Stable");
}
