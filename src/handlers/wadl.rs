//! WADL (Web Application Description Language) handler.
//!
//! No WADL handler survived in the filtered original source; grounded on
//! [`super::soap`]'s contract-mining shape, adapted to WADL's
//! `application`/`resources`/`resource`/`method` vocabulary.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

pub struct WadlHandler;

impl XmlHandler for WadlHandler {
    fn name(&self) -> &'static str {
        "WADLHandler"
    }

    fn can_handle(&self, root: Node, namespaces: &HashMap<String, String>) -> (bool, f64) {
        if local_name(root) != "application" {
            return (false, 0.0);
        }
        let mut confidence: f64 = 0.4;
        if namespaces_contain(namespaces, "wadl.dev.java.net") {
            confidence += 0.5;
        }
        if find_descendant(root, "resources").is_some() {
            confidence += 0.1;
        }
        let confidence = confidence.clamp(0.0, 1.0);
        (confidence >= 0.5, confidence)
    }

    fn detect_type(&self, _root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        DocumentTypeInfo::new("WADL API Description", 0.9)
            .with_metadata("category", json!("api_description"))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let resources = find_all(root, "resource");
        let methods = find_all(root, "method");
        let by_verb: HashMap<String, u64> = methods.iter().fold(HashMap::new(), |mut acc, m| {
            let verb = attr(*m, "name").unwrap_or("GET").to_string();
            *acc.entry(verb).or_insert(0) += 1;
            acc
        });

        let mut key_findings = HashMap::new();
        key_findings.insert("resources".to_string(), json!(resources.len()));
        key_findings.insert("methods_by_verb".to_string(), json!(by_verb));

        let mut data_inventory = HashMap::new();
        data_inventory.insert("resources".to_string(), resources.len() as u64);
        data_inventory.insert("methods".to_string(), methods.len() as u64);

        let documented = methods.iter().filter(|m| find_descendant(**m, "doc").is_some()).count();
        let completeness = if methods.is_empty() { 1.0 } else { documented as f64 / methods.len() as f64 };

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("completeness".to_string(), completeness);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec!["Document every method with a `doc` element before publishing".to_string()],
            data_inventory,
            ai_use_cases: vec!["API surface mining for client SDK generation".to_string()],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(completeness)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "resource_paths".to_string(),
            json!(find_all(root, "resource").into_iter().filter_map(|r| attr(r, "path")).collect::<Vec<_>>()),
        );
        data
    }
}
