//! S1000D graphic-entity safe-list extraction.
//!
//! Ported from `src/handlers/s1000d_entity_handler.py`: S1000D data modules
//! declare external `NDATA` entities for referenced graphics (ICNs). We scan
//! for those declarations, keep only the ones that satisfy the safe-list
//! rule, and strip the whole internal subset from the DOCTYPE before
//! reparsing.

use regex::Regex;
use std::sync::OnceLock;

/// A graphic entity declaration that passed the safe-list check
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct S1000dEntity {
    pub name: String,
    pub system_id: String,
    pub notation: String,
}

const S1000D_GRAPHIC_FORMATS: &[&str] = &["cgm", "jpg", "jpeg", "png", "tif", "tiff", "svg", "gif", "bmp"];

const S1000D_DOCTYPE_MARKERS: &[&str] = &[
    "<!doctype dmodule",
    "<!doctype pm",
    "<!doctype dml",
    "<!doctype scormcontentpackage",
    "<!doctype comrep",
];

/// Check the first ~500 bytes of a document for an S1000D DOCTYPE marker.
pub fn looks_like_s1000d(xml: &str) -> bool {
    let head: String = xml.chars().take(500).collect::<String>().to_lowercase();
    S1000D_DOCTYPE_MARKERS.iter().any(|marker| head.contains(marker))
}

fn entity_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?i)<!ENTITY\s+([A-Za-z0-9_.\-]+)\s+SYSTEM\s+"([^"]+)"\s+NDATA\s+(\w+)\s*>"#,
        )
        .expect("static regex")
    })
}

fn doctype_block_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<!DOCTYPE\s+(\w+)\s*\[(.*?)\]\s*>").expect("static regex")
    })
}

/// Is this a safe S1000D graphic entity declaration?
fn is_safe_entity(name: &str, system_id: &str, notation: &str) -> bool {
    if !name.starts_with("ICN-") {
        return false;
    }

    let ext = system_id.rsplit('.').next().unwrap_or("").to_lowercase();
    if !S1000D_GRAPHIC_FORMATS.contains(&ext.as_str()) {
        return false;
    }

    if !S1000D_GRAPHIC_FORMATS.contains(&notation.to_lowercase().as_str()) {
        return false;
    }

    let is_http = system_id.starts_with("http://") || system_id.starts_with("https://");
    if system_id.contains("..") && !is_http {
        return false;
    }
    if system_id.contains('/') && !is_http {
        return false;
    }

    true
}

/// Result of sanitizing an S1000D document's DOCTYPE block.
pub struct Sanitized {
    /// XML text with the DOCTYPE internal subset removed and entity
    /// references replaced by their system id (safe) or dropped (unsafe).
    pub xml: String,
    pub entities: Vec<S1000dEntity>,
}

/// Extract safe entities and produce a clean XML string ready for parsing.
pub fn sanitize(xml: &str) -> Sanitized {
    let mut safe = Vec::new();
    let mut unsafe_names = Vec::new();

    if let Some(caps) = doctype_block_pattern().captures(xml) {
        let subset = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        for entity_caps in entity_pattern().captures_iter(subset) {
            let name = entity_caps[1].to_string();
            let system_id = entity_caps[2].to_string();
            let notation = entity_caps[3].to_string();

            if is_safe_entity(&name, &system_id, &notation) {
                safe.push(S1000dEntity { name, system_id, notation });
            } else {
                tracing::warn!(entity = %name, "discarding unsafe S1000D entity declaration");
                unsafe_names.push(name);
            }
        }
    }

    let mut cleaned = doctype_block_pattern()
        .replace(xml, "<!DOCTYPE dmodule>")
        .into_owned();

    for entity in &safe {
        let reference = format!("&{};", entity.name);
        cleaned = cleaned.replace(&reference, &entity.system_id);
    }
    for name in &unsafe_names {
        let reference = format!("&{};", name);
        cleaned = cleaned.replace(&reference, "");
    }

    Sanitized { xml: cleaned, entities: safe }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_s1000d_marker() {
        assert!(looks_like_s1000d("<?xml version=\"1.0\"?><!DOCTYPE dmodule [ <!ENTITY x> ]>"));
        assert!(!looks_like_s1000d("<?xml version=\"1.0\"?><root/>"));
    }

    #[test]
    fn keeps_safe_drops_unsafe() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?><!DOCTYPE dmodule  [
  <!ENTITY ICN-C0419-S1000D0379-001-01 SYSTEM "ICN-C0419-S1000D0379-001-01.CGM" NDATA cgm >
  <!ENTITY dangerous SYSTEM "file:///etc/passwd" NDATA txt >
]>
<dmodule><content>Test content with &ICN-C0419-S1000D0379-001-01; reference</content></dmodule>"#;

        let sanitized = sanitize(xml);
        assert_eq!(sanitized.entities.len(), 1);
        assert_eq!(sanitized.entities[0].name, "ICN-C0419-S1000D0379-001-01");
        assert!(sanitized.xml.contains("ICN-C0419-S1000D0379-001-01.CGM"));
        assert!(!sanitized.xml.contains("dangerous"));
        assert!(!sanitized.xml.contains("<!ENTITY"));
    }
}
