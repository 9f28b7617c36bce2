//! Apache Ant build.xml handler (build/dependency family, spec §4.4.2).
//!
//! Grounded on `original_source/src/handlers/ant_build_handler.py`.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

pub struct AntHandler;

impl XmlHandler for AntHandler {
    fn name(&self) -> &'static str {
        "AntHandler"
    }

    fn can_handle(&self, root: Node, namespaces: &HashMap<String, String>) -> (bool, f64) {
        if local_name(root) != "project" {
            return (false, 0.0);
        }

        let mut confidence: f64 = 0.0;
        if attr(root, "name").is_some() {
            confidence += 0.3;
        }
        if attr(root, "default").is_some() {
            confidence += 0.3;
        }
        if attr(root, "basedir").is_some() {
            confidence += 0.2;
        }

        let ant_elements = ["target", "property", "taskdef", "path", "fileset"];
        let found = ant_elements.iter().filter(|e| find_descendant(root, e).is_some()).count();
        confidence += (found as f64 * 0.1).min(0.4);

        if namespaces_contain(namespaces, "antlib") {
            confidence += 0.2;
        }

        let confidence = confidence.clamp(0.0, 1.0);
        (confidence >= 0.5, confidence)
    }

    fn detect_type(&self, root: Node, namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        let project_name = attr(root, "name").unwrap_or("unknown");
        let default_target = attr(root, "default").unwrap_or("none");

        let mut doc_type = DocumentTypeInfo::new("Apache Ant Build", 0.95)
            .with_metadata("build_tool", json!("Apache Ant"))
            .with_metadata("project_name", json!(project_name))
            .with_metadata("default_target", json!(default_target));

        if namespaces_contain(namespaces, "ivy") {
            doc_type = doc_type.with_metadata("dependency_manager", json!("Apache Ivy"));
        }
        doc_type
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let targets = find_all(root, "target");
        let properties = find_all(root, "property");
        let depends_total: usize = targets
            .iter()
            .filter_map(|t| attr(*t, "depends"))
            .map(|d| d.split(',').count())
            .sum();

        let mut key_findings = HashMap::new();
        key_findings.insert(
            "targets".to_string(),
            json!(targets
                .iter()
                .map(|t| json!({
                    "name": attr(*t, "name"),
                    "depends": attr(*t, "depends"),
                }))
                .collect::<Vec<_>>()),
        );

        let mut data_inventory = HashMap::new();
        data_inventory.insert("targets".to_string(), targets.len() as u64);
        data_inventory.insert("properties".to_string(), properties.len() as u64);

        let complexity = ((targets.len() + depends_total + properties.len()) as f64 / 30.0).min(1.0);
        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("complexity".to_string(), complexity);
        quality_metrics.insert(
            "completeness".to_string(),
            if attr(root, "default").is_some() { 1.0 } else { 0.5 },
        );

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec![
                "Migrate to a dependency-managed build where feasible".to_string(),
                "Document the default target's intent".to_string(),
            ],
            data_inventory,
            ai_use_cases: vec![
                "Build graph visualization".to_string(),
                "CI/CD pipeline generation from targets".to_string(),
            ],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(1.0 - complexity * 0.3)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "targets".to_string(),
            json!(find_all(root, "target").into_iter().filter_map(|t| attr(t, "name")).collect::<Vec<_>>()),
        );
        data
    }
}
