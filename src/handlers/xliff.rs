//! XLIFF (translation interchange) handler (document/content family, spec §4.4.4).
//!
//! Grounded on `original_source/src/handlers/xliff_handler.py`: translation
//! state is tracked per `trans-unit` via the `state` attribute on `<target>`.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

pub struct XliffHandler;

impl XmlHandler for XliffHandler {
    fn name(&self) -> &'static str {
        "XLIFFHandler"
    }

    fn can_handle(&self, root: Node, namespaces: &HashMap<String, String>) -> (bool, f64) {
        if local_name(root) != "xliff" {
            return (false, 0.0);
        }
        let mut confidence: f64 = 0.5;
        if namespaces_contain(namespaces, "oasis-open.org:xliff") || namespaces_contain(namespaces, "xliff") {
            confidence += 0.4;
        }
        if find_descendant(root, "trans-unit").is_some() {
            confidence += 0.1;
        }
        let confidence = confidence.clamp(0.0, 1.0);
        (confidence >= 0.5, confidence)
    }

    fn detect_type(&self, root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        let version = attr(root, "version").unwrap_or("1.2").to_string();
        let (source_lang, target_lang) = find_descendant(root, "file")
            .map(|f| (attr(f, "source-language"), attr(f, "target-language")))
            .unwrap_or((None, None));

        DocumentTypeInfo::new("XLIFF Translation File", 0.9)
            .with_version(version)
            .with_metadata("source_language", json!(source_lang))
            .with_metadata("target_language", json!(target_lang))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let units = find_all(root, "trans-unit");
        let mut by_state: HashMap<String, u64> = HashMap::new();
        let mut translated = 0u64;
        for u in &units {
            let state = find_descendant(*u, "target")
                .and_then(|t| attr(t, "state"))
                .unwrap_or("new")
                .to_string();
            if state == "translated" || state == "final" {
                translated += 1;
            }
            *by_state.entry(state).or_insert(0) += 1;
        }

        let mut key_findings = HashMap::new();
        key_findings.insert("translation_state".to_string(), json!(by_state));

        let mut data_inventory = HashMap::new();
        data_inventory.insert("trans_units".to_string(), units.len() as u64);
        data_inventory.insert("translated".to_string(), translated);

        let completeness = if units.is_empty() { 1.0 } else { translated as f64 / units.len() as f64 };

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("completeness".to_string(), completeness);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec!["Prioritize untranslated units for the next localization sprint".to_string()],
            data_inventory,
            ai_use_cases: vec!["Machine-translation pretranslation".to_string(), "Localization progress tracking".to_string()],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(completeness)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "units".to_string(),
            json!(find_all(root, "trans-unit")
                .into_iter()
                .take(20)
                .map(|u| json!({
                    "id": attr(u, "id"),
                    "source": descendant_text(u, "source"),
                    "target": descendant_text(u, "target"),
                }))
                .collect::<Vec<_>>()),
        );
        data
    }
}
