//! KML (Keyhole Markup Language) handler (geospatial family, spec §4.4.3).
//!
//! Grounded on `original_source/src/handlers/kml_handler.py`.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

pub struct KmlHandler;

impl XmlHandler for KmlHandler {
    fn name(&self) -> &'static str {
        "KMLHandler"
    }

    fn can_handle(&self, root: Node, namespaces: &HashMap<String, String>) -> (bool, f64) {
        if namespaces_contain(namespaces, "opengis.net/kml") || namespaces_contain(namespaces, "earth.google.com/kml") {
            return (true, 1.0);
        }
        if local_name(root).eq_ignore_ascii_case("kml") {
            let kml_elements = ["Document", "Folder", "Placemark", "Point", "LineString", "Polygon"];
            let found = kml_elements.iter().filter(|e| find_descendant(root, e).is_some()).count();
            if found >= 2 {
                return (true, (found as f64 * 0.2).min(0.9));
            }
        }
        (false, 0.0)
    }

    fn detect_type(&self, root: Node, namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        let has_tour = find_descendant(root, "gx:Tour").is_some() || find_descendant(root, "Tour").is_some();
        let has_network_link = find_descendant(root, "NetworkLink").is_some();
        let variant = if has_tour {
            "google-earth-tour"
        } else if has_network_link {
            "network-linked"
        } else {
            "standard"
        };

        DocumentTypeInfo::new("KML Geographic Document", 0.95)
            .with_schema_uri(namespaces.values().find(|v| v.contains("kml")).cloned().unwrap_or_default())
            .with_metadata("variant", json!(variant))
            .with_metadata("category", json!("geospatial"))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let placemarks = find_all(root, "Placemark");
        let coords: Vec<(f64, f64)> = find_all(root, "coordinates")
            .into_iter()
            .flat_map(|n| parse_coordinates(&text_content(n)))
            .collect();
        let bounds = bounds_of(&coords);

        let mut key_findings = HashMap::new();
        key_findings.insert("placemarks".to_string(), json!(placemarks.len()));
        key_findings.insert("bounds".to_string(), json!(bounds));

        let mut data_inventory = HashMap::new();
        data_inventory.insert("placemarks".to_string(), placemarks.len() as u64);
        data_inventory.insert(
            "styles".to_string(),
            find_all(root, "Style").len() as u64,
        );

        let named = placemarks.iter().filter(|p| descendant_text(**p, "name").is_some()).count();
        let completeness = if placemarks.is_empty() { 1.0 } else { named as f64 / placemarks.len() as f64 };

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("completeness".to_string(), completeness);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec!["Validate coordinate ordering (lon,lat,alt)".to_string()],
            data_inventory,
            ai_use_cases: vec!["Geospatial feature extraction".to_string(), "Map visualization pipelines".to_string()],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(completeness)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "placemarks".to_string(),
            json!(find_all(root, "Placemark")
                .into_iter()
                .take(20)
                .map(|p| json!({ "name": descendant_text(p, "name") }))
                .collect::<Vec<_>>()),
        );
        data
    }
}

fn parse_coordinates(text: &str) -> Vec<(f64, f64)> {
    text.split_whitespace()
        .filter_map(|triple| {
            let mut parts = triple.split(',');
            let lon: f64 = parts.next()?.parse().ok()?;
            let lat: f64 = parts.next()?.parse().ok()?;
            Some((lon, lat))
        })
        .collect()
}

fn bounds_of(coords: &[(f64, f64)]) -> Value {
    if coords.is_empty() {
        return json!(null);
    }
    let (mut min_lon, mut max_lon) = (f64::MAX, f64::MIN);
    let (mut min_lat, mut max_lat) = (f64::MAX, f64::MIN);
    for (lon, lat) in coords {
        min_lon = min_lon.min(*lon);
        max_lon = max_lon.max(*lon);
        min_lat = min_lat.min(*lat);
        max_lat = max_lat.max(*lat);
    }
    json!({ "min_lon": min_lon, "max_lon": max_lon, "min_lat": min_lat, "max_lat": max_lat })
}
