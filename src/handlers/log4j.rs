//! Log4j XML configuration handler (config/log family, spec §4.4.5).
//!
//! No Log4j handler survived in the filtered original source; grounded on
//! `tests/unit/test_log4j_handler.py`'s shape (appender/logger catalog,
//! Log4Shell `${jndi:` detection) referenced from the distilled spec.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

pub struct Log4jHandler;

impl XmlHandler for Log4jHandler {
    fn name(&self) -> &'static str {
        "Log4jHandler"
    }

    fn can_handle(&self, root: Node, namespaces: &HashMap<String, String>) -> (bool, f64) {
        let name = local_name(root);
        if name != "Configuration" && name != "log4j:configuration" {
            return (false, 0.0);
        }
        let mut confidence: f64 = 0.4;
        if namespaces_contain(namespaces, "logging.apache.org/log4j") {
            confidence += 0.5;
        }
        if find_descendant(root, "Appenders").is_some() || find_descendant(root, "appender").is_some() {
            confidence += 0.2;
        }
        let confidence = confidence.clamp(0.0, 1.0);
        (confidence >= 0.5, confidence)
    }

    fn detect_type(&self, _root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        DocumentTypeInfo::new("Log4j Configuration", 0.9)
            .with_metadata("framework", json!("Log4j"))
            .with_metadata("category", json!("logging_configuration"))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let appenders = find_all(root, "Appender");
        let loggers = find_all(root, "Logger");
        let jndi_lookups: Vec<String> = root
            .descendants()
            .filter(|n| n.is_element())
            .flat_map(|n| n.attributes().map(move |a| (n, a)))
            .filter_map(|(n, a)| {
                if a.value().contains("${jndi:") {
                    Some(format!("{}@{}", local_name(n), a.name()))
                } else {
                    None
                }
            })
            .collect();
        let log4shell = !jndi_lookups.is_empty();

        let mut key_findings = HashMap::new();
        key_findings.insert("appenders".to_string(), json!(appenders.len()));
        key_findings.insert("loggers".to_string(), json!(loggers.len()));
        key_findings.insert("log4shell_pattern".to_string(), json!(log4shell));
        key_findings.insert("jndi_lookup_sites".to_string(), json!(jndi_lookups));

        let mut data_inventory = HashMap::new();
        data_inventory.insert("appenders".to_string(), appenders.len() as u64);
        data_inventory.insert("loggers".to_string(), loggers.len() as u64);

        let security_score = if log4shell { 0.0 } else { 1.0 };

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("security".to_string(), security_score);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: if log4shell {
                vec!["Upgrade past CVE-2021-44228; strip ${jndi:...} lookups from pattern layouts".to_string()]
            } else {
                vec!["Review appender retention policies".to_string()]
            },
            data_inventory,
            ai_use_cases: vec!["Vulnerability scanning of logging configs".to_string()],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(security_score)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "appender_names".to_string(),
            json!(find_all(root, "Appender").into_iter().filter_map(|a| attr(a, "name")).collect::<Vec<_>>()),
        );
        data
    }
}
