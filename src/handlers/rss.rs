//! RSS/Atom feed handler (document/content family, spec §4.4.4).
//!
//! Grounded on `original_source/src/handlers/rss_handler.py`.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::path::Path;

pub struct RssHandler;

impl XmlHandler for RssHandler {
    fn name(&self) -> &'static str {
        "RSSHandler"
    }

    fn can_handle(&self, root: Node, _namespaces: &HashMap<String, String>) -> (bool, f64) {
        match local_name(root) {
            "rss" => (true, 1.0),
            "feed" => (true, 0.9),
            _ => (false, 0.0),
        }
    }

    fn detect_type(&self, root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        let is_rss = local_name(root) == "rss";
        let version = attr(root, "version").unwrap_or("2.0").to_string();
        let feed_type = if is_rss { "RSS" } else { "Atom" };

        DocumentTypeInfo::new(format!("{feed_type} Feed"), 0.95)
            .with_version(version)
            .with_metadata("standard", json!(feed_type))
            .with_metadata("category", json!("content_syndication"))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let items = feed_items(root);
        let with_description = items.iter().filter(|i| find_descendant(**i, "description").is_some()).count();
        let with_date = items.iter().filter(|i| find_descendant(**i, "pubDate").is_some()).count();

        let mut categories: HashSet<String> = HashSet::new();
        for item in &items {
            for cat in find_all(*item, "category") {
                let t = text_content(cat);
                if !t.is_empty() {
                    categories.insert(t);
                }
            }
        }

        let mut key_findings = HashMap::new();
        key_findings.insert("total_items".to_string(), json!(items.len()));
        key_findings.insert("has_descriptions".to_string(), json!(with_description));
        key_findings.insert("has_dates".to_string(), json!(with_date));
        key_findings.insert("categories".to_string(), json!(categories.iter().collect::<Vec<_>>()));

        let mut data_inventory = HashMap::new();
        data_inventory.insert("articles".to_string(), items.len() as u64);
        data_inventory.insert("categories".to_string(), categories.len() as u64);

        let total = items.len();
        let (completeness, consistency) = if total == 0 {
            (0.0, 0.0)
        } else {
            (
                (with_description + with_date) as f64 / (2 * total) as f64,
                if with_description == total { 1.0 } else { with_description as f64 / total as f64 },
            )
        };

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("completeness".to_string(), completeness);
        quality_metrics.insert("consistency".to_string(), consistency);
        quality_metrics.insert("data_density".to_string(), 0.8);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec![
                "Use for content aggregation and analysis".to_string(),
                "Extract for trend analysis and topic modeling".to_string(),
            ],
            data_inventory,
            ai_use_cases: vec![
                "Content categorization and tagging".to_string(),
                "Topic modeling and clustering".to_string(),
            ],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality((completeness + consistency) / 2.0)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        let channel = find_descendant(root, "channel").unwrap_or(root);
        data.insert(
            "feed_metadata".to_string(),
            json!({
                "title": descendant_text(channel, "title"),
                "description": descendant_text(channel, "description"),
                "link": descendant_text(channel, "link"),
            }),
        );
        data.insert(
            "items".to_string(),
            json!(feed_items(root)
                .into_iter()
                .take(10)
                .map(|item| json!({
                    "title": descendant_text(item, "title"),
                    "description": descendant_text(item, "description"),
                    "pubDate": descendant_text(item, "pubDate"),
                    "link": descendant_text(item, "link"),
                }))
                .collect::<Vec<_>>()),
        );
        data
    }
}

fn feed_items(root: Node) -> Vec<Node> {
    let items = find_all(root, "item");
    if !items.is_empty() {
        return items;
    }
    find_all(root, "entry")
}
