//! The Handler Dispatch Engine (spec §4.3): registry-walk, max-confidence
//! selection with registry-order tie-break, and failure propagation.
//!
//! Grounded on the teacher's backend-selection flow in
//! `carles-abarca-docling-rs` (a `Converter` walking an ordered list of
//! backends and picking the first applicable one), generalized here to
//! confidence-based arbitration per the Design Notes' standardization of
//! max-confidence-with-tiebreak over the original's inconsistent
//! first-match-wins behavior.

use crate::datamodel::SpecializedAnalysis;
use crate::error::{Result, XmlInsightError};
use crate::handlers::{HandlerRegistry, XmlHandler, DISPATCH_THRESHOLD};
use crate::parser::ParsedDocument;
use serde_json::json;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// Run the registry-walk over an already safe-parsed document and return the
/// merged analysis, per spec §4.3 steps 2-6.
pub fn dispatch(registry: &HandlerRegistry, parsed: &ParsedDocument, path: &Path) -> Result<SpecializedAnalysis> {
    let root = parsed.root();

    let mut best: Option<(usize, f64, &Box<dyn XmlHandler>)> = None;
    for (index, handler) in registry.handlers().iter().enumerate() {
        let (matched, confidence) = probe(handler.as_ref(), root, &parsed.namespaces);
        if !matched || confidence < DISPATCH_THRESHOLD {
            continue;
        }
        match &best {
            Some((_, best_confidence, _)) if confidence <= *best_confidence => {}
            _ => best = Some((index, confidence, handler)),
        }
    }

    let (_, _, handler) = best.ok_or_else(|| {
        XmlInsightError::analysis(path, "<dispatch>", "no handler matched, including the generic fallback")
    })?;

    let mut analysis = handler
        .analyze(root, path)
        .map_err(|e| annotate(e, handler.name()))?;

    if !parsed.entities.is_empty() {
        let safe_names: Vec<String> = parsed.entities.iter().map(|e| e.name.clone()).collect();
        analysis
            .doc_type
            .metadata
            .insert("extracted_entities".to_string(), json!(safe_names));
    }

    Ok(analysis)
}

/// `can_handle` exceptions are swallowed and logged as `(false, 0.0)` per
/// spec §4.3 failure semantics; `std::panic::catch_unwind` stands in for
/// Rust's lack of checked exceptions here since handler authors cannot be
/// trusted not to panic on malformed input.
fn probe(handler: &dyn XmlHandler, root: roxmltree::Node, namespaces: &std::collections::HashMap<String, String>) -> (bool, f64) {
    match panic::catch_unwind(AssertUnwindSafe(|| handler.can_handle(root, namespaces))) {
        Ok(verdict) => verdict,
        Err(_) => {
            tracing::warn!(handler = handler.name(), "can_handle panicked; treating as no match");
            (false, 0.0)
        }
    }
}

fn annotate(err: XmlInsightError, handler: &str) -> XmlInsightError {
    match err {
        XmlInsightError::Analysis { path, message, .. } => {
            XmlInsightError::analysis(path, handler, message)
        }
        other => other,
    }
}
