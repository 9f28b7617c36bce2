//! GraphML handler (geospatial/graph family, spec §4.4.3).
//!
//! Grounded on `original_source/src/handlers/graphml_handler.py`.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

const GRAPHML_NS_HINTS: [&str; 2] = ["graphml.graphdrawing.org", "graphdrawing.org/xmlns"];

pub struct GraphMlHandler;

impl XmlHandler for GraphMlHandler {
    fn name(&self) -> &'static str {
        "GraphMLHandler"
    }

    fn can_handle(&self, root: Node, namespaces: &HashMap<String, String>) -> (bool, f64) {
        if namespaces.values().any(|uri| GRAPHML_NS_HINTS.iter().any(|n| uri.contains(n))) {
            return (true, 1.0);
        }
        if local_name(root).eq_ignore_ascii_case("graphml") {
            return (true, 0.95);
        }
        let elements = ["graph", "node", "edge", "key", "data"];
        let found = elements.iter().filter(|e| find_descendant(root, e).is_some()).count();
        if found >= 3 {
            return (true, (found as f64 * 0.2).min(0.9));
        }
        (false, 0.0)
    }

    fn detect_type(&self, root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        let nodes = find_all(root, "node").len();
        let edges = find_all(root, "edge").len();
        let directed = find_descendant(root, "graph")
            .and_then(|g| attr(g, "edgedefault"))
            .map(|d| d == "directed")
            .unwrap_or(false);

        let graph_type = if edges == 0 {
            "disconnected-nodes"
        } else if (edges as f64) > (nodes as f64) * 1.5 {
            "dense"
        } else {
            "sparse"
        };

        DocumentTypeInfo::new("GraphML Document", 0.95)
            .with_schema_uri("http://graphml.graphdrawing.org/xmlns")
            .with_metadata("directed", json!(directed))
            .with_metadata("graph_type", json!(graph_type))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let nodes = find_all(root, "node");
        let edges = find_all(root, "edge");

        let mut degree: HashMap<String, u64> = HashMap::new();
        for e in &edges {
            if let Some(src) = attr(*e, "source") {
                *degree.entry(src.to_string()).or_insert(0) += 1;
            }
            if let Some(tgt) = attr(*e, "target") {
                *degree.entry(tgt.to_string()).or_insert(0) += 1;
            }
        }
        let density = if nodes.len() > 1 {
            (2.0 * edges.len() as f64) / (nodes.len() as f64 * (nodes.len() as f64 - 1.0))
        } else {
            0.0
        };

        let mut key_findings = HashMap::new();
        key_findings.insert("density".to_string(), json!(density));
        key_findings.insert(
            "degree_distribution".to_string(),
            json!(degree.values().copied().collect::<Vec<_>>()),
        );

        let mut data_inventory = HashMap::new();
        data_inventory.insert("nodes".to_string(), nodes.len() as u64);
        data_inventory.insert("edges".to_string(), edges.len() as u64);

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("density".to_string(), density.clamp(0.0, 1.0));

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec!["Check for isolated nodes before running centrality algorithms".to_string()],
            data_inventory,
            ai_use_cases: vec!["Graph embedding".to_string(), "Network topology analysis".to_string()],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(density.clamp(0.0, 1.0))
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "node_ids".to_string(),
            json!(find_all(root, "node").into_iter().filter_map(|n| attr(n, "id")).collect::<Vec<_>>()),
        );
        data
    }
}
