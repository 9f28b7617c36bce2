//! Apache Ivy module descriptor handler (build/dependency family, spec §4.4.2).
//!
//! No Ivy handler survived in the filtered original source; grounded on the
//! detection/extraction shape of [`super::maven_pom`] and [`super::ant`],
//! adapted to Ivy's `ivy-module` root and `<dependencies>/<dependency>` tree.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

pub struct IvyHandler;

impl XmlHandler for IvyHandler {
    fn name(&self) -> &'static str {
        "IvyHandler"
    }

    fn can_handle(&self, root: Node, _namespaces: &HashMap<String, String>) -> (bool, f64) {
        if local_name(root) != "ivy-module" {
            return (false, 0.0);
        }
        let mut confidence: f64 = 0.7;
        if find_descendant(root, "info").is_some() {
            confidence += 0.2;
        }
        if find_descendant(root, "dependencies").is_some() {
            confidence += 0.1;
        }
        let confidence = confidence.clamp(0.0, 1.0);
        (confidence >= 0.5, confidence)
    }

    fn detect_type(&self, root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        let version = attr(root, "version").unwrap_or("2.0").to_string();
        DocumentTypeInfo::new("Apache Ivy Module", 0.9)
            .with_version(version)
            .with_metadata("build_tool", json!("Apache Ivy"))
            .with_metadata("category", json!("build_configuration"))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());
        let deps = find_all(root, "dependency");
        let confs = find_all(root, "conf");

        let mut key_findings = HashMap::new();
        key_findings.insert(
            "module_info".to_string(),
            json!(find_descendant(root, "info").map(|info| json!({
                "organisation": attr(info, "organisation"),
                "module": attr(info, "module"),
                "revision": attr(info, "revision"),
            }))),
        );

        let mut data_inventory = HashMap::new();
        data_inventory.insert("dependencies".to_string(), deps.len() as u64);
        data_inventory.insert("configurations".to_string(), confs.len() as u64);

        let resolved = deps.iter().filter(|d| attr(**d, "rev").is_some()).count();
        let dependency_management = if deps.is_empty() { 1.0 } else { resolved as f64 / deps.len() as f64 };

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("dependency_management".to_string(), dependency_management);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec![
                "Pin explicit revisions instead of dynamic `latest.*` constraints".to_string(),
            ],
            data_inventory,
            ai_use_cases: vec!["Dependency resolution graph mining".to_string()],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(dependency_management)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "dependencies".to_string(),
            json!(find_all(root, "dependency")
                .into_iter()
                .map(|d| json!({
                    "org": attr(d, "org"),
                    "name": attr(d, "name"),
                    "rev": attr(d, "rev"),
                }))
                .collect::<Vec<_>>()),
        );
        data
    }
}
