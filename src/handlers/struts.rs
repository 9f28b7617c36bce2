//! Apache Struts configuration handler (config/log family, spec §4.4.5).
//!
//! No Struts handler survived in the filtered original source; grounded on
//! [`super::spring`]'s bean-catalog shape, adapted to Struts'
//! `struts-config`/`action`/`form-bean` vocabulary.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

pub struct StrutsHandler;

impl XmlHandler for StrutsHandler {
    fn name(&self) -> &'static str {
        "StrutsHandler"
    }

    fn can_handle(&self, root: Node, _namespaces: &HashMap<String, String>) -> (bool, f64) {
        match local_name(root) {
            "struts-config" => (true, 0.95),
            "struts" => (true, 0.8),
            _ => (false, 0.0),
        }
    }

    fn detect_type(&self, _root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        DocumentTypeInfo::new("Apache Struts Configuration", 0.9)
            .with_metadata("framework", json!("Struts"))
            .with_metadata("category", json!("web_configuration"))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let actions = find_all(root, "action");
        let form_beans = find_all(root, "form-bean");

        let mut key_findings = HashMap::new();
        key_findings.insert(
            "actions".to_string(),
            json!(actions
                .iter()
                .map(|a| json!({ "path": attr(*a, "path"), "type": attr(*a, "type") }))
                .collect::<Vec<_>>()),
        );

        let mut data_inventory = HashMap::new();
        data_inventory.insert("actions".to_string(), actions.len() as u64);
        data_inventory.insert("form_beans".to_string(), form_beans.len() as u64);

        let with_type = actions.iter().filter(|a| attr(**a, "type").is_some()).count();
        let completeness = if actions.is_empty() { 1.0 } else { with_type as f64 / actions.len() as f64 };

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("completeness".to_string(), completeness);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec!["Migrate legacy Struts 1 action mappings ahead of end-of-life".to_string()],
            data_inventory,
            ai_use_cases: vec!["Legacy web application inventory".to_string()],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(completeness)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "action_paths".to_string(),
            json!(find_all(root, "action").into_iter().filter_map(|a| attr(a, "path")).collect::<Vec<_>>()),
        );
        data
    }
}
