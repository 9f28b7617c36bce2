//! Shared traversal helpers used by every specialized handler.
//!
//! The original Python handlers lean on `ElementTree`'s `.//tag` XPath-style
//! descendant queries (see `maven_pom_handler.py`, `rss_handler.py`, …); per
//! the Design Notes, a systems-language port replaces that with plain
//! recursive-descent helpers over the borrowed `roxmltree` tree.

use roxmltree::Node;
use std::collections::HashMap;

/// Local name with any `{namespace}` prefix stripped (roxmltree already
/// separates this out; this is just a convenience accessor).
pub fn local_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

pub fn namespace_uri<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.tag_name().namespace()
}

/// First descendant (in document order, including indirect descendants)
/// whose local name matches.
pub fn find_descendant<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.descendants().find(|n| n.is_element() && local_name(*n) == name)
}

/// All descendants whose local name matches, in document order.
pub fn find_all<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Vec<Node<'a, 'input>> {
    node.descendants()
        .filter(|n| n.is_element() && local_name(*n) == name)
        .collect()
}

/// Direct element children only (used for top-level content-aware bucketing
/// and for distinguishing a node's own fields from nested descendants).
pub fn child_elements<'a, 'input>(node: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    node.children().filter(|n| n.is_element()).collect()
}

/// First direct child element with the given local name.
pub fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.is_element() && local_name(*n) == name)
}

/// Attribute value by plain (unprefixed) name.
pub fn attr<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

/// Concatenated text of all descendant text nodes, trimmed.
pub fn text_content(node: Node) -> String {
    let mut out = String::new();
    for descendant in node.descendants() {
        if descendant.is_text() {
            if let Some(t) = descendant.text() {
                out.push_str(t);
            }
        }
    }
    out.trim().to_string()
}

/// Trimmed text of a descendant element found by local name, if any.
pub fn descendant_text(node: Node, name: &str) -> Option<String> {
    find_descendant(node, name).map(text_content).filter(|s| !s.is_empty())
}

/// True if any declared namespace URI contains `needle` (case-sensitive, the
/// original handlers' `str(namespaces.values())` substring check).
pub fn namespaces_contain(namespaces: &HashMap<String, String>, needle: &str) -> bool {
    namespaces.values().any(|uri| uri.contains(needle))
}

/// Slash-separated path of local element names from the document root down
/// to (and including) `node`.
pub fn element_path(node: Node) -> String {
    let mut names: Vec<&str> = node
        .ancestors()
        .filter(|n| n.is_element())
        .map(local_name)
        .collect();
    names.reverse();
    names.join("/")
}

/// Opening-tag snapshot for a node (`<tag attr="val">`), used for
/// `parent_context` in hierarchical chunking.
pub fn opening_tag(node: Node) -> String {
    let mut tag = format!("<{}", local_name(node));
    for a in node.attributes() {
        tag.push_str(&format!(" {}=\"{}\"", a.name(), a.value()));
    }
    tag.push('>');
    tag
}

/// Serialize a node's subtree back to an XML string. roxmltree is read-only
/// and keeps no serializer, so this walks the tree and re-emits markup.
pub fn serialize(node: Node) -> String {
    let mut out = String::new();
    serialize_into(node, &mut out);
    out
}

fn serialize_into(node: Node, out: &mut String) {
    if node.is_text() {
        if let Some(t) = node.text() {
            out.push_str(&escape_text(t));
        }
        return;
    }
    if !node.is_element() {
        return;
    }

    out.push('<');
    out.push_str(local_name(node));
    for a in node.attributes() {
        out.push(' ');
        out.push_str(a.name());
        out.push_str("=\"");
        out.push_str(&escape_attr(a.value()));
        out.push('"');
    }

    if node.children().next().is_none() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in node.children() {
        serialize_into(child, out);
    }
    out.push_str("</");
    out.push_str(local_name(node));
    out.push('>');
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// All local element names contained in a subtree, in document order,
/// without duplicates removed (callers dedupe when the invariant calls for
/// a set).
pub fn local_names_in(node: Node) -> Vec<String> {
    node.descendants()
        .filter(|n| n.is_element())
        .map(|n| local_name(n).to_string())
        .collect()
}

/// Maximum depth of the subtree rooted at `node` (root = depth 1).
pub fn max_depth(node: Node) -> usize {
    let mut max = 0usize;
    for d in node.descendants().filter(|n| n.is_element()) {
        let depth = d.ancestors().filter(|n| n.is_element()).count();
        max = max.max(depth);
    }
    max
}
