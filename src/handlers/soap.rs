//! SOAP envelope handler (protocol/security message family, spec §4.4.1).
//!
//! Grounded on `original_source/src/handlers/soap_envelope_handler.py`.

use super::support::*;
use super::XmlHandler;
use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

const SOAP11_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const SOAP12_NS: &str = "http://www.w3.org/2003/05/soap-envelope";

pub struct SoapHandler;

impl XmlHandler for SoapHandler {
    fn name(&self) -> &'static str {
        "SOAPHandler"
    }

    fn can_handle(&self, root: Node, namespaces: &HashMap<String, String>) -> (bool, f64) {
        if local_name(root) != "Envelope" {
            return (false, 0.0);
        }
        let mut confidence: f64 = 0.45;
        if namespaces_contain(namespaces, SOAP11_NS) || namespaces_contain(namespaces, SOAP12_NS) {
            confidence += 0.65;
        }
        if find_descendant(root, "Body").is_some() {
            confidence += 0.1;
        }
        let confidence = confidence.clamp(0.0, 1.0);
        (confidence >= 0.5, confidence)
    }

    fn detect_type(&self, root: Node, namespaces: &HashMap<String, String>) -> DocumentTypeInfo {
        let version = if namespaces_contain(namespaces, SOAP12_NS) { "1.2" } else { "1.1" };
        let body_class = find_descendant(root, "Body")
            .and_then(|b| child_elements(b).into_iter().next())
            .map(|n| local_name(n).to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        DocumentTypeInfo::new(format!("SOAP {version} Envelope"), 0.9)
            .with_version(version)
            .with_schema_uri(if version == "1.2" { SOAP12_NS } else { SOAP11_NS })
            .with_metadata("body_class", json!(body_class))
    }

    fn analyze(&self, root: Node, _path: &Path) -> Result<SpecializedAnalysis> {
        let doc_type = self.detect_type(root, &HashMap::new());

        let has_header = find_descendant(root, "Header").is_some();
        let fault = find_descendant(root, "Fault");
        let fault_code = fault.and_then(|f| descendant_text(f, "faultcode").or_else(|| descendant_text(f, "Code")));
        let has_signature = find_descendant(root, "Signature").is_some();

        let mut key_findings = HashMap::new();
        key_findings.insert(
            "envelope".to_string(),
            json!({
                "has_header": has_header,
                "is_fault": fault.is_some(),
                "fault_code": fault_code,
            }),
        );

        let security_score = if has_signature { 0.8 } else { 0.4 };

        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("security".to_string(), security_score);
        quality_metrics.insert("well_formed".to_string(), 1.0);

        let mut data_inventory = HashMap::new();
        data_inventory.insert("headers".to_string(), if has_header { 1 } else { 0 });
        data_inventory.insert("faults".to_string(), if fault.is_some() { 1 } else { 0 });

        Ok(SpecializedAnalysis {
            doc_type,
            key_findings,
            recommendations: vec![
                "Validate WS-Security headers when present".to_string(),
                "Confirm fault codes map to a known SOAP fault namespace".to_string(),
            ],
            data_inventory,
            ai_use_cases: vec![
                "Web service contract mining".to_string(),
                "Fault pattern analysis across integration logs".to_string(),
            ],
            structured_data: self.extract_key_data(root),
            quality_metrics,
        }
        .finalize_quality(security_score)
        .with_handler_used(self.name()))
    }

    fn extract_key_data(&self, root: Node) -> HashMap<String, Value> {
        let mut data = HashMap::new();
        data.insert(
            "body_children".to_string(),
            json!(find_descendant(root, "Body")
                .map(|b| child_elements(b).into_iter().map(|n| local_name(n).to_string()).collect::<Vec<_>>())
                .unwrap_or_default()),
        );
        data
    }
}
