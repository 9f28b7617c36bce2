//! Java Properties-XML handler (config/log family, spec §4.4.5).
//!
//! Grounded on `original_source/src/handlers/properties_xml_handler.py`.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

const SENSITIVE_KEYWORDS: [&str; 4] = ["password", "secret", "token", "key"];

pub struct PropertiesXmlHandler;

impl XmlHandler for PropertiesXmlHandler {
    fn name(&self) -> &'static str {
        "PropertiesXMLHandler"
    }

    fn can_handle(&self, root: Node, _namespaces: &HashMap<String, String>) -> (bool, f64) {
        if local_name(root) != "properties" {
            return (false, 0.0);
        }
        if find_descendant(root, "entry").is_some() {
            return (true, 1.0);
        }
        if find_descendant(root, "comment").is_some() {
            return (true, 0.8);
        }
        (true, 0.6)
    }

    fn detect_type(&self, root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        DocumentTypeInfo::new("Java Properties XML", 0.9)
            .with_version("1.0")
            .with_metadata("comment", json!(descendant_text(root, "comment")))
            .with_metadata("category", json!("configuration"))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let entries = find_all(root, "entry");
        let sensitive: Vec<String> = entries
            .iter()
            .filter_map(|e| attr(*e, "key").map(|k| (k, text_content(*e))))
            .filter(|(k, v)| {
                let lower = k.to_lowercase();
                SENSITIVE_KEYWORDS.iter().any(|kw| lower.contains(kw)) && !v.is_empty()
            })
            .map(|(k, _)| k.to_string())
            .collect();

        let mut by_prefix: HashMap<String, u64> = HashMap::new();
        for e in &entries {
            if let Some(key) = attr(*e, "key") {
                let prefix = key.split('.').next().unwrap_or(key).to_string();
                *by_prefix.entry(prefix).or_insert(0) += 1;
            }
        }

        let mut key_findings = HashMap::new();
        key_findings.insert("properties_by_prefix".to_string(), json!(by_prefix));
        key_findings.insert("sensitive_keys".to_string(), json!(sensitive));

        let mut data_inventory = HashMap::new();
        data_inventory.insert("entries".to_string(), entries.len() as u64);
        data_inventory.insert("sensitive_entries".to_string(), sensitive.len() as u64);

        let security_score = if entries.is_empty() {
            1.0
        } else {
            1.0 - (sensitive.len() as f64 / entries.len() as f64)
        };

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("security".to_string(), security_score);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: if sensitive.is_empty() {
                vec!["Group related properties under common prefixes".to_string()]
            } else {
                vec!["Move sensitive values to an encrypted secret store".to_string()]
            },
            data_inventory,
            ai_use_cases: vec!["Configuration drift detection".to_string()],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(security_score)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "keys".to_string(),
            json!(find_all(root, "entry").into_iter().filter_map(|e| attr(e, "key")).collect::<Vec<_>>()),
        );
        data
    }
}
