//! JUnit/TestNG test report handler.
//!
//! Grounded on `original_source/src/handlers/test_report_handler.py`.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

pub struct JUnitHandler;

impl XmlHandler for JUnitHandler {
    fn name(&self) -> &'static str {
        "JUnitHandler"
    }

    fn can_handle(&self, root: Node, _namespaces: &HashMap<String, String>) -> (bool, f64) {
        let name = local_name(root);
        if matches!(name, "testsuites" | "testsuite") && (attr(root, "tests").is_some() || attr(root, "failures").is_some()) {
            return (true, 1.0);
        }
        if name == "testng-results" {
            return (true, 1.0);
        }
        let indicators = ["testcase", "test-method", "test", "suite"];
        let found = indicators.iter().filter(|i| find_descendant(root, i).is_some()).count();
        if found >= 2 {
            return (true, (found as f64 * 0.3).min(0.9));
        }
        (false, 0.0)
    }

    fn detect_type(&self, root: Node, _namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        let (framework, version) = match local_name(root) {
            "testng-results" => ("TestNG", attr(root, "version").unwrap_or("unknown").to_string()),
            _ if find_descendant(root, "properties").is_some() => ("JUnit", "4.x".to_string()),
            _ => ("JUnit", "5.x".to_string()),
        };

        DocumentTypeInfo::new(format!("{framework} Test Report"), 0.95)
            .with_version(version)
            .with_metadata("framework", json!(framework))
            .with_metadata("category", json!("test_results"))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let testcases = find_all(root, "testcase");
        let failures = find_all(root, "failure");
        let errors = find_all(root, "error");
        let skipped = find_all(root, "skipped");

        let pass_count = testcases.len().saturating_sub(failures.len() + errors.len() + skipped.len());

        let mut key_findings = HashMap::new();
        key_findings.insert("total_tests".to_string(), json!(testcases.len()));
        key_findings.insert("failures".to_string(), json!(failures.len()));
        key_findings.insert("errors".to_string(), json!(errors.len()));
        key_findings.insert("passed".to_string(), json!(pass_count));

        let mut data_inventory = HashMap::new();
        data_inventory.insert("testcases".to_string(), testcases.len() as u64);
        data_inventory.insert("failures".to_string(), failures.len() as u64);
        data_inventory.insert("errors".to_string(), errors.len() as u64);

        let pass_rate = if testcases.is_empty() { 1.0 } else { pass_count as f64 / testcases.len() as f64 };

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("pass_rate".to_string(), pass_rate);

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: if pass_rate < 1.0 {
                vec!["Investigate failing and erroring test cases before release".to_string()]
            } else {
                vec!["All tests passing; consider expanding coverage".to_string()]
            },
            data_inventory,
            ai_use_cases: vec!["Flaky test detection".to_string(), "Test suite health dashboards".to_string()],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(pass_rate)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "failing_tests".to_string(),
            json!(find_all(root, "testcase")
                .into_iter()
                .filter(|t| find_descendant(*t, "failure").is_some())
                .filter_map(|t| attr(t, "name"))
                .collect::<Vec<_>>()),
        );
        data
    }
}
