//! Per-document-type semantic boundary sets (spec §4.5(a)).

const GENERIC: [&str; 9] = ["section", "chapter", "article", "entry", "item", "record", "entity", "document", "part"];

/// The whitelist of local element names that constitute natural cut points
/// for hierarchical chunking of a document of the given classified type.
pub fn boundary_set_for(type_name: &str) -> Vec<&'static str> {
    let lower = type_name.to_lowercase();
    let mut set: Vec<&'static str> = Vec::new();

    if lower.contains("scap") {
        set.extend(["Rule", "Group"]);
    }
    if lower.contains("ant") {
        set.push("target");
    }
    if lower.contains("spring") {
        set.push("bean");
    }
    if lower.contains("docbook") {
        set.extend(["section", "chapter"]);
    }
    if lower.contains("xliff") {
        set.push("trans-unit");
    }
    if lower.contains("kml") {
        set.push("Placemark");
    }
    if lower.contains("graphml") {
        set.extend(["node", "edge"]);
    }
    if lower.contains("maven") {
        set.extend(["dependency", "plugin"]);
    }
    if lower.contains("saml") || lower.contains("soap") {
        set.push("Assertion");
    }

    if set.is_empty() {
        set.extend(GENERIC);
    }
    set
}

/// Document types considered hierarchical-friendly by the auto-selection
/// decision procedure (spec §4.5(d) step 1).
pub fn is_hierarchical_friendly(type_name: &str) -> bool {
    let lower = type_name.to_lowercase();
    ["scap", "docbook", "spring", "xliff", "maven", "ant"]
        .iter()
        .any(|needle| lower.contains(needle))
}
