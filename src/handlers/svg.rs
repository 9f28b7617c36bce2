//! SVG handler (document/content family, spec §4.4.4).
//!
//! No SVG handler survived in the filtered original source; grounded on
//! [`super::kml`]'s feature-inventory shape, adapted to SVG's
//! `svg`/`path`/`rect`/`text` vocabulary.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

const SHAPE_ELEMENTS: [&str; 6] = ["path", "rect", "circle", "ellipse", "line", "polygon"];

pub struct SvgHandler;

impl XmlHandler for SvgHandler {
    fn name(&self) -> &'static str {
        "SVGHandler"
    }

    fn can_handle(&self, root: Node, namespaces: &HashMap<String, String>) -> (bool, f64) {
        if local_name(root) != "svg" {
            return (false, 0.0);
        }
        let mut confidence: f64 = 0.5;
        if namespaces_contain(namespaces, "w3.org/2000/svg") {
            confidence += 0.4;
        }
        let confidence = confidence.clamp(0.0, 1.0);
        (confidence >= 0.5, confidence)
    }

    fn detect_type(&self, root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        let version = attr(root, "version").unwrap_or("1.1").to_string();
        DocumentTypeInfo::new("SVG Graphic", 0.9)
            .with_version(version)
            .with_schema_uri("http://www.w3.org/2000/svg")
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let shapes: usize = SHAPE_ELEMENTS.iter().map(|e| find_all(root, e).len()).sum();
        let text_nodes = find_all(root, "text");
        let titled = find_descendant(root, "title").is_some();

        let mut key_findings = HashMap::new();
        key_findings.insert("shape_count".to_string(), json!(shapes));
        key_findings.insert("text_elements".to_string(), json!(text_nodes.len()));
        key_findings.insert("has_title".to_string(), json!(titled));

        let mut data_inventory = HashMap::new();
        data_inventory.insert("shapes".to_string(), shapes as u64);
        data_inventory.insert("text_elements".to_string(), text_nodes.len() as u64);

        let accessibility = if titled { 1.0 } else { 0.5 };

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("accessibility".to_string(), accessibility);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec!["Add a `title` element for screen-reader accessibility".to_string()],
            data_inventory,
            ai_use_cases: vec!["Vector graphic content extraction".to_string()],
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
