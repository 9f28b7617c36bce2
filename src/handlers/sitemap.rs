//! XML sitemap handler.
//!
//! No sitemap handler survived in the filtered original source; grounded on
//! [`super::rss`]'s item-inventory shape, adapted to the sitemaps.org
//! `urlset`/`url`/`loc` vocabulary.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

pub struct SitemapHandler;

impl XmlHandler for SitemapHandler {
    fn name(&self) -> &'static str {
        "SitemapHandler"
    }

    fn can_handle(&self, root: Node, namespaces: &HashMap<String, String>) -> (bool, f64) {
        let name = local_name(root);
        if name != "urlset" && name != "sitemapindex" {
            return (false, 0.0);
        }
        let mut confidence: f64 = 0.6;
        if namespaces_contain(namespaces, "sitemaps.org/schemas/sitemap") {
            confidence += 0.4;
        }
        let confidence = confidence.clamp(0.0, 1.0);
        (confidence >= 0.5, confidence)
    }

    fn detect_type(&self, root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        let is_index = local_name(root) == "sitemapindex";
        DocumentTypeInfo::new(if is_index { "Sitemap Index" } else { "XML Sitemap" }, 0.9)
            .with_metadata("category", json!("seo"))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let urls = find_all(root, "url");
        let with_priority = urls.iter().filter(|u| find_descendant(**u, "priority").is_some()).count();
        let with_lastmod = urls.iter().filter(|u| find_descendant(**u, "lastmod").is_some()).count();

        let mut key_findings = HashMap::new();
        key_findings.insert("urls".to_string(), json!(urls.len()));
        key_findings.insert("with_lastmod".to_string(), json!(with_lastmod));

        let mut data_inventory = HashMap::new();
        data_inventory.insert("urls".to_string(), urls.len() as u64);

        let completeness = if urls.is_empty() { 1.0 } else { with_priority as f64 / urls.len() as f64 };

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("completeness".to_string(), completeness);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec!["Add lastmod timestamps to improve crawl scheduling".to_string()],
            data_inventory,
            ai_use_cases: vec!["Site structure crawling".to_string()],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(completeness)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "locations".to_string(),
            json!(find_all(root, "url").into_iter().filter_map(|u| descendant_text(u, "loc")).collect::<Vec<_>>()),
        );
        data
    }
}
