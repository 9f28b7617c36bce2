//! The generic fallback handler (spec §4.2): always matches, low confidence,
//! guarantees the dispatch engine never reports "unhandled".

use super::support::*;
use super::{XmlHandler, DISPATCH_THRESHOLD};
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

pub struct GenericHandler;

impl XmlHandler for GenericHandler {
    fn name(&self) -> &'static str {
        "GenericHandler"
    }

    /// Always matches, at exactly the dispatch threshold — low enough that
    /// any specialized handler's positive confidence outranks it, high
    /// enough that the engine's own threshold filter never excludes it.
    fn can_handle(&self, _root: Node, _namespaces: &HashMap<String, String>) -> (bool, f64) {
        (true, DISPATCH_THRESHOLD)
    }

    fn detect_type(&self, root: Node, namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        DocumentTypeInfo::new("Generic XML", 0.3)
            .with_metadata("root_element", json!(local_name(root)))
            .with_metadata("namespace_count", json!(namespaces.len()))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        // `descendants()` includes `root` itself; report the count of
        // elements below it, so an empty `<root/>` reads as zero elements.
        let element_count = root.descendants().filter(|n| n.is_element()).count() - 1;
        let depth = max_depth(root);

        let mut key_findings = HashMap::new();
        key_findings.insert("element_count".to_string(), json!(element_count));
        key_findings.insert("max_depth".to_string(), json!(depth));

        let mut data_inventory = HashMap::new();
        data_inventory.insert("elements".to_string(), element_count as u64);

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("completeness".to_string(), 0.3);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec!["No specialized handler recognized this document; consider adding one".to_string()],
            data_inventory,
            ai_use_cases: vec!["Generic structural indexing".to_string()],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(0.3)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert("root_element".to_string(), json!(local_name(root)));
        let unique: std::collections::HashSet<String> = local_names_in(root).into_iter().collect();
        data.insert("unique_tags".to_string(), json!(unique.len()));
        data
    }
}
