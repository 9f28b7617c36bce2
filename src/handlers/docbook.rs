//! DocBook handler (document/content family, spec §4.4.4).
//!
//! Grounded on `original_source/src/handlers/docbook_handler.py`.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

const DOCBOOK_ROOTS: [&str; 5] = ["book", "article", "chapter", "section", "para"];

pub struct DocBookHandler;

impl XmlHandler for DocBookHandler {
    fn name(&self) -> &'static str {
        "DocBookHandler"
    }

    fn can_handle(&self, root: Node, namespaces: &HashMap<String, String>) -> (bool, f64) {
        if namespaces_contain(namespaces, "docbook.org") {
            return (true, 1.0);
        }
        if DOCBOOK_ROOTS.contains(&local_name(root)) {
            return (true, 0.8);
        }
        (false, 0.0)
    }

    fn detect_type(&self, root: Node, namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        let version = attr(root, "version")
            .map(str::to_string)
            .or_else(|| namespaces.values().find(|v| v.contains("docbook.org")).map(|_| "5.0".to_string()))
            .unwrap_or_else(|| "4.5".to_string());

        DocumentTypeInfo::new("DocBook Documentation", 0.9)
            .with_version(version)
            .with_metadata("framework", json!("DocBook"))
            .with_metadata("document_type", json!(local_name(root)))
            .with_metadata("has_chapters", json!(find_descendant(root, "chapter").is_some()))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let chapters = find_all(root, "chapter");
        let sections = find_all(root, "section");
        let title = descendant_text(root, "title");
        let abstract_present = find_descendant(root, "abstract").is_some();

        let xrefs = find_all(root, "xref");
        let ids: std::collections::HashSet<&str> = root
            .descendants()
            .filter(|n| n.is_element())
            .filter_map(|n| attr(n, "id"))
            .collect();
        let dangling = xrefs
            .iter()
            .filter(|x| attr(**x, "linkend").map(|l| !ids.contains(l)).unwrap_or(true))
            .count();
        let reference_integrity = if xrefs.is_empty() { 1.0 } else { 1.0 - (dangling as f64 / xrefs.len() as f64) };

        let mut key_findings = HashMap::new();
        key_findings.insert(
            "structure".to_string(),
            json!({
                "title": title,
                "chapter_titles": chapters.iter().filter_map(|c| descendant_text(*c, "title")).collect::<Vec<_>>(),
            }),
        );

        let mut data_inventory = HashMap::new();
        data_inventory.insert("chapters".to_string(), chapters.len() as u64);
        data_inventory.insert("sections".to_string(), sections.len() as u64);
        data_inventory.insert("cross_references".to_string(), xrefs.len() as u64);

        let completeness = (title.is_some() as u8 as f64 + abstract_present as u8 as f64) / 2.0;
        let overall = (completeness + reference_integrity) / 2.0;

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("completeness".to_string(), completeness);
        quality_metrics.insert("reference_integrity".to_string(), reference_integrity);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec![
                "Add an abstract to improve discoverability".to_string(),
                "Resolve dangling cross-references before publishing".to_string(),
            ],
            data_inventory,
            ai_use_cases: vec!["Documentation summarization".to_string(), "Outline-aware retrieval".to_string()],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(overall)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "chapter_titles".to_string(),
            json!(find_all(root, "chapter").into_iter().filter_map(|c| descendant_text(c, "title")).collect::<Vec<_>>()),
        );
        data
    }
}
