//! The Safe Parser: defensive XML loading with S1000D entity handling.
//!
//! Mirrors the contract in spec §4.1. Callers perform the read in two
//! steps so the parsed tree can borrow directly from an owned buffer without
//! a self-referential struct:
//!
//! ```ignore
//! let sanitized = parser::read_and_sanitize(path, max_bytes)?;
//! let parsed = parser::parse(path, &sanitized.xml, sanitized.entities)?;
//! ```

pub mod bomb;
pub mod s1000d;
pub mod size_limits;

use crate::error::{ParseErrorKind, XmlInsightError};
use std::collections::HashMap;
use std::path::Path;

pub use s1000d::S1000dEntity;

/// Sanitized, decoded XML text ready to hand to the XML parser.
pub struct Sanitized {
    pub xml: String,
    pub entities: Vec<S1000dEntity>,
}

/// Read a file, enforce the size ceiling, decode UTF-8/UTF-16, and disarm
/// any DOCTYPE-based attack before parsing.
pub fn read_and_sanitize(path: &Path, max_bytes: Option<u64>) -> crate::error::Result<Sanitized> {
    let metadata = std::fs::metadata(path).map_err(|source| XmlInsightError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(limit) = max_bytes {
        if metadata.len() > limit {
            return Err(XmlInsightError::Size {
                path: path.to_path_buf(),
                size_bytes: metadata.len(),
                limit_bytes: limit,
            });
        }
    }

    let bytes = std::fs::read(path).map_err(|source| XmlInsightError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let text = decode(&bytes).ok_or_else(|| {
        XmlInsightError::parse(path, ParseErrorKind::Malformed, "unable to decode as UTF-8 or UTF-16")
    })?;

    sanitize_text(path, text)
}

/// Sanitize already-decoded XML text (used directly by tests and by callers
/// that already have the document in memory).
pub fn sanitize_text(path: &Path, text: String) -> crate::error::Result<Sanitized> {
    if s1000d::looks_like_s1000d(&text) {
        let sanitized = s1000d::sanitize(&text);
        return Ok(Sanitized {
            xml: sanitized.xml,
            entities: sanitized.entities,
        });
    }

    match bomb::classify(&text) {
        bomb::Threat::None => Ok(Sanitized { xml: text, entities: Vec::new() }),
        bomb::Threat::UnsafeEntity => Err(XmlInsightError::parse(
            path,
            ParseErrorKind::UnsafeEntity,
            "DOCTYPE references an external entity or DTD outside the S1000D safe-list",
        )),
        bomb::Threat::XmlBomb => Err(XmlInsightError::parse(
            path,
            ParseErrorKind::XmlBomb,
            "DOCTYPE internal subset contains a self-referencing entity expansion chain",
        )),
    }
}

fn decode(bytes: &[u8]) -> Option<String> {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8(bytes[3..].to_vec()).ok();
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return decode_utf16(&bytes[2..], true);
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return decode_utf16(&bytes[2..], false);
    }
    String::from_utf8(bytes.to_vec()).ok()
}

fn decode_utf16(bytes: &[u8], little_endian: bool) -> Option<String> {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| {
            if little_endian {
                u16::from_le_bytes([pair[0], pair[1]])
            } else {
                u16::from_be_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    String::from_utf16(&units).ok()
}

/// The result of safe-parsing a document: a borrowed, read-only tree plus
/// the namespace map and source text needed for line-offset bookkeeping.
pub struct ParsedDocument<'a> {
    pub tree: roxmltree::Document<'a>,
    pub namespaces: HashMap<String, String>,
    pub source: &'a str,
    pub entities: Vec<S1000dEntity>,
}

impl<'a> ParsedDocument<'a> {
    pub fn root(&self) -> roxmltree::Node<'_, 'a> {
        self.tree.root_element()
    }
}

/// Parse sanitized XML text into a borrowed tree.
pub fn parse<'a>(
    path: &Path,
    xml: &'a str,
    entities: Vec<S1000dEntity>,
) -> crate::error::Result<ParsedDocument<'a>> {
    let tree = roxmltree::Document::parse(xml).map_err(|e| {
        XmlInsightError::parse(path, ParseErrorKind::Malformed, e.to_string())
    })?;

    let namespaces = collect_namespaces(&tree);

    Ok(ParsedDocument {
        tree,
        namespaces,
        source: xml,
        entities,
    })
}

fn collect_namespaces(tree: &roxmltree::Document) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for node in tree.root_element().descendants().filter(|n| n.is_element()) {
        for ns in node.namespaces() {
            let prefix = ns.name().unwrap_or("").to_string();
            map.insert(prefix, ns.uri().to_string());
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn p() -> PathBuf {
        PathBuf::from("test.xml")
    }

    #[test]
    fn parses_empty_root() {
        let sanitized = sanitize_text(&p(), "<root/>".to_string()).unwrap();
        let parsed = parse(&p(), &sanitized.xml, sanitized.entities).unwrap();
        assert_eq!(parsed.root().tag_name().name(), "root");
    }

    #[test]
    fn rejects_external_dtd() {
        let text = r#"<!DOCTYPE root SYSTEM "http://evil.example/evil.dtd"><root/>"#.to_string();
        let err = sanitize_text(&p(), text).unwrap_err();
        match err {
            XmlInsightError::Parse { kind, .. } => assert_eq!(kind, ParseErrorKind::UnsafeEntity),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn collects_namespaces() {
        let sanitized = sanitize_text(
            &p(),
            r#"<a xmlns:x="urn:x"><x:b/></a>"#.to_string(),
        )
        .unwrap();
        let parsed = parse(&p(), &sanitized.xml, sanitized.entities).unwrap();
        assert_eq!(parsed.namespaces.get("x").map(String::as_str), Some("urn:x"));
    }
}
