//! Spring Framework XML configuration handler (config/log family, spec §4.4.5).
//!
//! Grounded on `original_source/src/handlers/spring_config_handler.py`.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

const SPRING_INDICATORS: [&str; 3] = [
    "springframework.org/schema/beans",
    "springframework.org/schema/context",
    "springframework.org/schema/mvc",
];

pub struct SpringHandler;

impl XmlHandler for SpringHandler {
    fn name(&self) -> &'static str {
        "SpringHandler"
    }

    fn can_handle(&self, root: Node, namespaces: &HashMap<String, String>) -> (bool, f64) {
        if namespaces.values().any(|uri| SPRING_INDICATORS.iter().any(|i| uri.contains(i))) {
            return (true, 1.0);
        }
        if local_name(root) == "beans" {
            return (true, 0.7);
        }
        (false, 0.0)
    }

    fn detect_type(&self, _root: Node, namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        let version = namespaces
            .values()
            .find(|uri| uri.contains("springframework.org/schema"))
            .and_then(|uri| uri.rsplit('/').next())
            .and_then(|tail| tail.strip_suffix(".xsd"))
            .map(str::to_string)
            .unwrap_or_else(|| "5.x".to_string());

        DocumentTypeInfo::new("Spring Configuration", 1.0)
            .with_version(version)
            .with_metadata("framework", json!("Spring Framework"))
            .with_metadata("category", json!("dependency_injection"))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let beans = find_all(root, "bean");
        let profiles = find_all(root, "beans")
            .into_iter()
            .filter_map(|b| attr(b, "profile"))
            .map(str::to_string)
            .collect::<Vec<_>>();
        let has_aop = find_descendant(root, "aop:config").is_some() || find_descendant(root, "config").is_some();
        let has_security = find_descendant(root, "http").is_some();

        let mut key_findings = HashMap::new();
        key_findings.insert(
            "beans".to_string(),
            json!(beans
                .iter()
                .map(|b| json!({ "id": attr(*b, "id"), "class": attr(*b, "class") }))
                .collect::<Vec<_>>()),
        );
        key_findings.insert("aop_config".to_string(), json!(has_aop));
        key_findings.insert("security_config".to_string(), json!(has_security));

        let mut data_inventory = HashMap::new();
        data_inventory.insert("beans".to_string(), beans.len() as u64);
        data_inventory.insert("profiles".to_string(), profiles.len() as u64);

        let with_class = beans.iter().filter(|b| attr(**b, "class").is_some()).count();
        let completeness = if beans.is_empty() { 1.0 } else { with_class as f64 / beans.len() as f64 };

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("completeness".to_string(), completeness);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec![
                "Review bean dependencies for circular references".to_string(),
                "Consider migrating to annotation-based configuration".to_string(),
            ],
            data_inventory,
            ai_use_cases: vec!["Dependency graph visualization".to_string(), "Security misconfiguration detection".to_string()],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(completeness)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "bean_ids".to_string(),
            json!(find_all(root, "bean").into_iter().filter_map(|b| attr(b, "id")).collect::<Vec<_>>()),
        );
        data
    }
}
