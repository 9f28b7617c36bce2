//! Maven Project Object Model handler (build/dependency family, spec §4.4.2).
//!
//! Grounded on `original_source/src/handlers/maven_pom_handler.py`.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

pub struct MavenPomHandler;

impl XmlHandler for MavenPomHandler {
    fn name(&self) -> &'static str {
        "MavenPOMHandler"
    }

    fn can_handle(&self, root: Node, namespaces: &HashMap<String, String>) -> (bool, f64) {
        if local_name(root) != "project" {
            return (false, 0.0);
        }
        if namespaces_contain(namespaces, "maven.apache.org") {
            return (true, 1.0);
        }
        if find_descendant(root, "groupId").is_some() && find_descendant(root, "artifactId").is_some() {
            return (true, 0.8);
        }
        (false, 0.0)
    }

    fn detect_type(&self, root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        let version = descendant_text(root, "modelVersion").unwrap_or_else(|| "4.0.0".to_string());
        DocumentTypeInfo::new("Maven POM", 0.95)
            .with_version(version)
            .with_schema_uri("http://maven.apache.org/POM/4.0.0")
            .with_metadata("build_tool", json!("Maven"))
            .with_metadata("category", json!("build_configuration"))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let deps = find_all(root, "dependency");
        let dep_list: Vec<Value> = deps.iter().map(|d| dependency_json(*d)).collect();
        let deps_with_version = dep_list.iter().filter(|d| !d["version"].is_null()).count();

        let plugins = find_all(root, "plugin");
        let properties = child(root, "properties").map(child_elements).unwrap_or_default();
        let management_deps = find_descendant(root, "dependencyManagement")
            .map(|dm| find_all(dm, "dependency").len())
            .unwrap_or(0);

        let has_description = descendant_text(root, "description").is_some();
        let has_url = descendant_text(root, "url").is_some();

        let mut key_findings = HashMap::new();
        key_findings.insert(
            "project_info".to_string(),
            json!({
                "name": descendant_text(root, "name"),
                "description": descendant_text(root, "description"),
                "url": descendant_text(root, "url"),
                "parent": child(root, "parent").map(coordinates_json),
            }),
        );
        key_findings.insert(
            "dependencies".to_string(),
            json!({ "all": dep_list, "count": deps.len(), "management": management_deps }),
        );

        let mut data_inventory = HashMap::new();
        data_inventory.insert("dependencies".to_string(), deps.len() as u64);
        data_inventory.insert("plugins".to_string(), plugins.len() as u64);
        data_inventory.insert("properties".to_string(), properties.len() as u64);

        let completeness = (has_description as u8 as f64 + has_url as u8 as f64) / 2.0;
        let dependency_management = if deps.is_empty() {
            1.0
        } else {
            deps_with_version as f64 / deps.len() as f64
        };
        let best_practices = if management_deps > 0 { 0.8 } else { 0.4 };
        let overall = (completeness + dependency_management + best_practices) / 3.0;

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("completeness".to_string(), completeness);
        quality_metrics.insert("dependency_management".to_string(), dependency_management);
        quality_metrics.insert("best_practices".to_string(), best_practices);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec![
                "Analyze dependency tree for security vulnerabilities".to_string(),
                "Check for outdated dependencies".to_string(),
                "Monitor for license compliance".to_string(),
            ],
            data_inventory,
            ai_use_cases: vec![
                "Dependency vulnerability detection".to_string(),
                "License compliance checking".to_string(),
                "Build optimization recommendations".to_string(),
            ],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(overall)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert("coordinates".to_string(), coordinates_json(root));
        data.insert(
            "dependencies".to_string(),
            json!(find_all(root, "dependency").into_iter().take(20).map(dependency_json).collect::<Vec<_>>()),
        );
        data.insert(
            "build_config".to_string(),
            json!(child(root, "build").map(|b| json!({
                "sourceDirectory": descendant_text(b, "sourceDirectory"),
                "outputDirectory": descendant_text(b, "outputDirectory"),
                "finalName": descendant_text(b, "finalName"),
            })).unwrap_or_else(|| json!({}))),
        );
        data
    }
}

fn coordinates_json(node: Node) -> Value {
    json!({
        "groupId": descendant_text(node, "groupId"),
        "artifactId": descendant_text(node, "artifactId"),
        "version": descendant_text(node, "version"),
        "packaging": descendant_text(node, "packaging").unwrap_or_else(|| "jar".to_string()),
    })
}

fn dependency_json(node: Node) -> Value {
    json!({
        "groupId": descendant_text(node, "groupId"),
        "artifactId": descendant_text(node, "artifactId"),
        "version": descendant_text(node, "version"),
        "scope": descendant_text(node, "scope").unwrap_or_else(|| "compile".to_string()),
    })
}
