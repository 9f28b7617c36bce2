//! ServiceNow ITSM export handler.
//!
//! Grounded on `original_source/src/handlers/servicenow_handler.py`.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

pub struct ServiceNowHandler;

impl XmlHandler for ServiceNowHandler {
    fn name(&self) -> &'static str {
        "ServiceNowHandler"
    }

    fn can_handle(&self, root: Node, _namespaces: &HashMap<String, String>) -> (bool, f64) {
        let mut score: f64 = 0.0;
        if local_name(root) == "unload" {
            score += 0.4;
        }
        if find_descendant(root, "incident").is_some() {
            score += 0.3;
        }
        if find_descendant(root, "sys_journal_field").is_some() {
            score += 0.2;
        }
        if find_descendant(root, "sys_attachment").is_some() {
            score += 0.1;
        }
        if root.descendants().any(|n| n.is_element() && attr(n, "display_value").is_some()) {
            score += 0.1;
        }
        let score = score.clamp(0.0, 1.0);
        (score > 0.5, score)
    }

    fn detect_type(&self, root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        let record_types: Vec<String> = child_elements(root).iter().map(|c| local_name(*c).to_string()).collect();

        DocumentTypeInfo::new("ServiceNow Export", 0.9)
            .with_metadata("platform", json!("ServiceNow"))
            .with_metadata("category", json!("itsm"))
            .with_metadata("record_types", json!(record_types))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let incidents = find_all(root, "incident");
        let journals = find_all(root, "sys_journal_field");
        let attachments = find_all(root, "sys_attachment");
        let custom_fields: usize = incidents
            .iter()
            .flat_map(|i| child_elements(*i))
            .filter(|c| local_name(*c).starts_with("u_"))
            .count();

        let mut key_findings = HashMap::new();
        key_findings.insert("incidents".to_string(), json!(incidents.len()));
        key_findings.insert("journal_entries".to_string(), json!(journals.len()));
        key_findings.insert("custom_fields".to_string(), json!(custom_fields));

        let mut data_inventory = HashMap::new();
        data_inventory.insert("incidents".to_string(), incidents.len() as u64);
        data_inventory.insert("attachments".to_string(), attachments.len() as u64);

        let with_priority = incidents.iter().filter(|i| find_descendant(**i, "priority").is_some()).count();
        let completeness = if incidents.is_empty() { 1.0 } else { with_priority as f64 / incidents.len() as f64 };

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("completeness".to_string(), completeness);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec!["Correlate journal entries with assignment history for SLA audits".to_string()],
            data_inventory,
            ai_use_cases: vec!["Incident triage automation".to_string(), "SLA breach prediction".to_string()],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(completeness)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "incident_numbers".to_string(),
            json!(find_all(root, "incident").into_iter().filter_map(|i| descendant_text(i, "number")).collect::<Vec<_>>()),
        );
        data
    }
}
