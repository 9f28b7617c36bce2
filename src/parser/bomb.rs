//! Generic DOCTYPE threat classification for non-S1000D documents:
//! rejects external DTD/entity fetches and detects entity-expansion bombs
//! (billion laughs) before a single byte is handed to the XML parser.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threat {
    /// No DOCTYPE, or a harmless one with no internal subset
    None,
    /// DOCTYPE references an external SYSTEM/PUBLIC identifier, or declares
    /// an entity with an external SYSTEM identifier
    UnsafeEntity,
    /// Internal entities form a self-referencing expansion chain
    XmlBomb,
}

fn doctype_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?is)<!DOCTYPE\s+\w[\w.\-:]*\s*(?:(SYSTEM|PUBLIC)\s+"[^"]*"(?:\s+"[^"]*")?)?\s*(?:\[(.*?)\])?\s*>"#,
        )
        .expect("static regex")
    })
}

fn general_entity_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<!ENTITY\s+(\w[\w.\-]*)\s+"([^"]*)"\s*>"#).expect("static regex")
    })
}

fn external_entity_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<!ENTITY\s+(\w[\w.\-]*)\s+(?:SYSTEM|PUBLIC)\s+"[^"]*""#).expect("static regex")
    })
}

fn entity_ref_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&(\w[\w.\-]*);").expect("static regex"))
}

/// Classify the DOCTYPE threat level of a raw (pre-parse) XML document.
///
/// Only examines documents that are *not* recognized as S1000D (those go
/// through [`super::s1000d::sanitize`] instead).
pub fn classify(xml: &str) -> Threat {
    let Some(caps) = doctype_pattern().captures(xml) else {
        return Threat::None;
    };

    if caps.get(1).is_some() {
        // External SYSTEM/PUBLIC identifier directly on the DOCTYPE: an
        // attempt to fetch an external DTD. Never honored.
        return Threat::UnsafeEntity;
    }

    let Some(subset) = caps.get(2).map(|m| m.as_str()) else {
        return Threat::None;
    };

    if external_entity_pattern().is_match(subset) {
        return Threat::UnsafeEntity;
    }

    let mut definitions: HashMap<String, String> = HashMap::new();
    for entity_caps in general_entity_pattern().captures_iter(subset) {
        definitions.insert(entity_caps[1].to_string(), entity_caps[2].to_string());
    }

    if is_expansion_bomb(&definitions) {
        return Threat::XmlBomb;
    }

    Threat::None
}

/// Heuristic billion-laughs detector: true if there is a chain of at least
/// three entities where each definition references an earlier entity at
/// least twice (the classic doubling/exponential pattern).
fn is_expansion_bomb(definitions: &HashMap<String, String>) -> bool {
    if definitions.len() < 3 {
        return false;
    }

    let mut doubling_links = 0usize;
    for text in definitions.values() {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for m in entity_ref_pattern().captures_iter(text) {
            let name = m.get(1).unwrap().as_str();
            if definitions.contains_key(name) {
                *counts.entry(name).or_insert(0) += 1;
            }
        }
        if counts.values().any(|&c| c >= 2) {
            doubling_links += 1;
        }
    }

    doubling_links >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_doctype_is_safe() {
        assert_eq!(classify("<root/>"), Threat::None);
    }

    #[test]
    fn external_system_doctype_is_unsafe() {
        let xml = r#"<!DOCTYPE root SYSTEM "http://evil.example/evil.dtd"><root/>"#;
        assert_eq!(classify(xml), Threat::UnsafeEntity);
    }

    #[test]
    fn billion_laughs_is_detected() {
        let xml = r#"<!DOCTYPE lolz [
  <!ENTITY lol "lol">
  <!ENTITY lol2 "&lol;&lol;&lol;&lol;&lol;&lol;&lol;&lol;&lol;&lol;">
  <!ENTITY lol3 "&lol2;&lol2;&lol2;&lol2;&lol2;&lol2;&lol2;&lol2;&lol2;&lol2;">
]>
<lolz>&lol3;</lolz>"#;
        assert_eq!(classify(xml), Threat::XmlBomb);
    }

    #[test]
    fn benign_internal_entity_is_safe() {
        let xml = r#"<!DOCTYPE root [ <!ENTITY copyright "Example Corp"> ]><root>&copyright;</root>"#;
        assert_eq!(classify(xml), Threat::None);
    }
}
