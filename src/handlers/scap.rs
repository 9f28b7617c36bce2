//! SCAP (Security Content Automation Protocol) handler.
//!
//! Grounded on `original_source/src/handlers/scap_handler.py`: Rule/Group
//! count as the rule inventory, Benchmark/TestResult root shapes as the
//! main classification signal.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

pub struct ScapHandler;

impl XmlHandler for ScapHandler {
    fn name(&self) -> &'static str {
        "SCAPHandler"
    }

    fn can_handle(&self, root: Node, namespaces: &HashMap<String, String>) -> (bool, f64) {
        let name = local_name(root);
        let mut score: f64 = 0.0;

        let ns_hit = namespaces_contain(namespaces, "scap.nist.gov")
            || namespaces_contain(namespaces, "checklists.nist.gov/xccdf")
            || namespaces_contain(namespaces, "oval.mitre.org");
        if ns_hit {
            score += 0.6;
        }
        if matches!(name, "Benchmark" | "TestResult" | "Profile") {
            score += 0.4;
        }

        let score = score.clamp(0.0, 1.0);
        (score >= 0.5, score)
    }

    fn detect_type(&self, root: Node, namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        let ns_uri = namespace_uri(root).unwrap_or_default();
        let doc_type = if ns_uri.to_lowercase().contains("xccdf") || local_name(root) == "Benchmark" {
            "SCAP/XCCDF Document"
        } else if ns_uri.to_lowercase().contains("oval") {
            "SCAP/OVAL Document"
        } else {
            "SCAP Security Report"
        };

        DocumentTypeInfo::new(doc_type, 0.9)
            .with_schema_uri(ns_uri)
            .with_metadata("standard", json!("NIST SCAP"))
            .with_metadata("root_element", json!(local_name(root)))
            .with_metadata("namespace_count", json!(namespaces.len()))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let rules = find_all(root, "Rule");
        let groups = find_all(root, "Group");

        let mut key_findings = HashMap::new();
        key_findings.insert("total_rules".to_string(), json!(rules.len()));
        key_findings.insert("total_groups".to_string(), json!(groups.len()));

        let mut data_inventory = HashMap::new();
        data_inventory.insert("rules".to_string(), rules.len() as u64);
        data_inventory.insert("groups".to_string(), groups.len() as u64);

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("completeness".to_string(), 0.85);
        quality_metrics.insert("consistency".to_string(), 0.9);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec![
                "Use for automated compliance monitoring".to_string(),
                "Extract failed rules for remediation workflows".to_string(),
            ],
            data_inventory,
            ai_use_cases: vec![
                "Automated compliance report generation".to_string(),
                "Security posture classification".to_string(),
            ],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(0.85)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "rule_ids".to_string(),
            json!(find_all(root, "Rule")
                .into_iter()
                .filter_map(|n| attr(n, "id"))
                .collect::<Vec<_>>()),
        );
        data
    }
}
