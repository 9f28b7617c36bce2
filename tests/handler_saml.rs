//! SAML 2.0 assertion end-to-end scenario.

use std::io::Write;
use tempfile::NamedTempFile;
use xml_insight::facade::analyze;

fn write_fixture(xml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(xml.as_bytes()).expect("write fixture");
    file
}

#[test]
fn saml_assertion_is_classified_with_high_confidence() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<Assertion xmlns="urn:oasis:names:tc:SAML:2.0:assertion" Version="2.0" ID="x" IssueInstant="2020-01-01T00:00:00Z">
  <Issuer>idp</Issuer>
  <Subject><NameID>user</NameID></Subject>
</Assertion>"#;
    let file = write_fixture(xml);

    let analysis = analyze(file.path()).expect("analyze should succeed");

    assert_eq!(analysis.doc_type.type_name, "SAML 2.0 Assertion");
    assert!(analysis.doc_type.confidence >= 0.9, "confidence was {}", analysis.doc_type.confidence);
    assert_eq!(analysis.doc_type.metadata.get("message_type").unwrap(), "Assertion");
    assert_eq!(
        analysis.doc_type.metadata.get("handler_used").unwrap(),
        "SAMLHandler"
    );
}
