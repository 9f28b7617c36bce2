//! XHTML handler (document/content family, spec §4.4.4).
//!
//! No XHTML handler survived in the filtered original source; grounded on
//! [`super::docbook`]'s accessibility/outline shape, adapted to XHTML's
//! `html`/`head`/`body`/heading vocabulary.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

pub struct XhtmlHandler;

impl XmlHandler for XhtmlHandler {
    fn name(&self) -> &'static str {
        "XHTMLHandler"
    }

    fn can_handle(&self, root: Node, namespaces: &HashMap<String, String>) -> (bool, f64) {
        if local_name(root) != "html" {
            return (false, 0.0);
        }
        let mut confidence: f64 = 0.4;
        if namespaces_contain(namespaces, "w3.org/1999/xhtml") {
            confidence += 0.5;
        }
        if find_descendant(root, "body").is_some() {
            confidence += 0.1;
        }
        let confidence = confidence.clamp(0.0, 1.0);
        (confidence >= 0.5, confidence)
    }

    fn detect_type(&self, root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        DocumentTypeInfo::new("XHTML Document", 0.9)
            .with_schema_uri("http://www.w3.org/1999/xhtml")
            .with_metadata("title", json!(descendant_text(root, "title")))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let images = find_all(root, "img");
        let with_alt = images.iter().filter(|i| attr(**i, "alt").map(|a| !a.is_empty()).unwrap_or(false)).count();
        let heading_counts: HashMap<String, u64> = HEADINGS
            .iter()
            .map(|h| (h.to_string(), find_all(root, h).len() as u64))
            .collect();
        let links = find_all(root, "a");

        let mut key_findings = HashMap::new();
        key_findings.insert("heading_hierarchy".to_string(), json!(heading_counts));
        key_findings.insert(
            "alt_text_coverage".to_string(),
            json!(if images.is_empty() { 1.0 } else { with_alt as f64 / images.len() as f64 }),
        );

        let mut data_inventory = HashMap::new();
        data_inventory.insert("images".to_string(), images.len() as u64);
        data_inventory.insert("links".to_string(), links.len() as u64);

        let accessibility = if images.is_empty() { 1.0 } else { with_alt as f64 / images.len() as f64 };

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("accessibility".to_string(), accessibility);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec!["Provide alt text for every image".to_string()],
            data_inventory,
            ai_use_cases: vec!["Web content extraction".to_string(), "Accessibility auditing".to_string()],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(accessibility)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert("title".to_string(), json!(descendant_text(root, "title")));
        data
    }
}
