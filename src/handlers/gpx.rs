//! GPX (GPS Exchange Format) handler (geospatial family, spec §4.4.3).
//!
//! No GPX handler survived in the filtered original source; grounded on
//! [`super::kml`]'s coordinate-bounds approach, adapted to GPX's
//! `trk`/`trkseg`/`trkpt`/`wpt` vocabulary.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

pub struct GpxHandler;

impl XmlHandler for GpxHandler {
    fn name(&self) -> &'static str {
        "GPXHandler"
    }

    fn can_handle(&self, root: Node, namespaces: &HashMap<String, String>) -> (bool, f64) {
        if local_name(root) != "gpx" {
            return (false, 0.0);
        }
        let mut confidence: f64 = 0.5;
        if namespaces_contain(namespaces, "topografix.com/GPX") {
            confidence += 0.4;
        }
        if find_descendant(root, "trk").is_some() || find_descendant(root, "wpt").is_some() {
            confidence += 0.1;
        }
        let confidence = confidence.clamp(0.0, 1.0);
        (confidence >= 0.5, confidence)
    }

    fn detect_type(&self, root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        let version = attr(root, "version").unwrap_or("1.1").to_string();
        DocumentTypeInfo::new("GPX Track Document", 0.9)
            .with_version(version)
            .with_metadata("category", json!("geospatial"))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let tracks = find_all(root, "trk");
        let waypoints = find_all(root, "wpt");
        let trackpoints = find_all(root, "trkpt");

        let mut key_findings = HashMap::new();
        key_findings.insert("tracks".to_string(), json!(tracks.len()));
        key_findings.insert("trackpoints".to_string(), json!(trackpoints.len()));

        let mut data_inventory = HashMap::new();
        data_inventory.insert("tracks".to_string(), tracks.len() as u64);
        data_inventory.insert("waypoints".to_string(), waypoints.len() as u64);

        let with_elevation = trackpoints.iter().filter(|p| find_descendant(**p, "ele").is_some()).count();
        let completeness = if trackpoints.is_empty() { 1.0 } else { with_elevation as f64 / trackpoints.len() as f64 };

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("completeness".to_string(), completeness);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec!["Fill missing elevation samples before route analysis".to_string()],
            data_inventory,
            ai_use_cases: vec!["Route reconstruction".to_string(), "Activity pattern mining".to_string()],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(completeness)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "track_names".to_string(),
            json!(find_all(root, "trk").into_iter().filter_map(|t| descendant_text(t, "name")).collect::<Vec<_>>()),
        );
        data
    }
}
