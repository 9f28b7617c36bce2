//! Hibernate ORM mapping handler (build/dependency family, spec §4.4.2).
//!
//! No Hibernate handler survived in the filtered original source; grounded
//! on the detection/extraction shape of [`super::spring`], adapted to
//! Hibernate's `hibernate-mapping`/`class`/`property` element vocabulary.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

pub struct HibernateHandler;

impl XmlHandler for HibernateHandler {
    fn name(&self) -> &'static str {
        "HibernateHandler"
    }

    fn can_handle(&self, root: Node, _namespaces: &HashMap<String, String>) -> (bool, f64) {
        if local_name(root) != "hibernate-mapping" {
            return (false, 0.0);
        }
        let mut confidence: f64 = 0.6;
        if find_descendant(root, "class").is_some() {
            confidence += 0.3;
        }
        let confidence = confidence.clamp(0.0, 1.0);
        (confidence >= 0.5, confidence)
    }

    fn detect_type(&self, _root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        DocumentTypeInfo::new("Hibernate Mapping", 0.9)
            .with_metadata("orm", json!("Hibernate"))
            .with_metadata("category", json!("persistence_configuration"))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());
        let classes = find_all(root, "class");
        let properties = find_all(root, "property");

        let mut key_findings = HashMap::new();
        key_findings.insert(
            "entities".to_string(),
            json!(classes
                .iter()
                .map(|c| json!({ "name": attr(*c, "name"), "table": attr(*c, "table") }))
                .collect::<Vec<_>>()),
        );

        let mut data_inventory = HashMap::new();
        data_inventory.insert("entities".to_string(), classes.len() as u64);
        data_inventory.insert("properties".to_string(), properties.len() as u64);

        let with_table = classes.iter().filter(|c| attr(**c, "table").is_some()).count();
        let completeness = if classes.is_empty() { 1.0 } else { with_table as f64 / classes.len() as f64 };

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("completeness".to_string(), completeness);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec!["Prefer annotation-based mapping for new entities".to_string()],
            data_inventory,
            ai_use_cases: vec!["Schema reverse-engineering from ORM mappings".to_string()],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(completeness)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "classes".to_string(),
            json!(find_all(root, "class").into_iter().filter_map(|c| attr(c, "name")).collect::<Vec<_>>()),
        );
        data
    }
}
