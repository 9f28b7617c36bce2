//! Maven POM and Apache Ant build end-to-end scenarios (spec §4.4.2).

use std::io::Write;
use tempfile::NamedTempFile;
use xml_insight::facade::analyze;

fn write_fixture(xml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(xml.as_bytes()).expect("write fixture");
    file
}

#[test]
fn maven_pom_reports_single_dependency() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.example</groupId>
  <artifactId>test-project</artifactId>
  <version>1.0.0</version>
  <dependencies>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <version>4.12</version>
    </dependency>
  </dependencies>
</project>"#;
    let file = write_fixture(xml);

    let analysis = analyze(file.path()).expect("analyze should succeed");

    assert_eq!(analysis.doc_type.type_name, "Maven POM");
    assert!(analysis.doc_type.confidence >= 0.95, "confidence was {}", analysis.doc_type.confidence);
    assert_eq!(*analysis.data_inventory.get("dependencies").unwrap(), 1);
    assert_eq!(
        analysis.structured_data["coordinates"]["artifactId"],
        "test-project"
    );
}

#[test]
fn ant_build_counts_targets() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<project name="demo" default="build" basedir=".">
  <target name="init"/>
  <target name="compile" depends="init"/>
  <target name="build" depends="compile"/>
</project>"#;
    let file = write_fixture(xml);

    let analysis = analyze(file.path()).expect("analyze should succeed");

    assert_eq!(analysis.doc_type.type_name, "Apache Ant Build");
    assert_eq!(*analysis.data_inventory.get("targets").unwrap(), 3);
    let overall = analysis.quality_metrics["overall"];
    assert!((0.0..=1.0).contains(&overall));
}
