//! The full analysis report produced by a specialized handler.

use super::document_type::DocumentTypeInfo;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// Domain-specific analysis of a classified document.
///
/// Carries every field of [`DocumentTypeInfo`] by composition (embedding,
/// not field duplication) rather than the original Python framework's
/// parallel-copy pattern (see `migrate_handlers_v2.py`); `Deref`/`DerefMut`
/// make the embedded fields feel flat at call sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecializedAnalysis {
    #[serde(flatten)]
    pub doc_type: DocumentTypeInfo,

    pub key_findings: HashMap<String, Value>,
    pub recommendations: Vec<String>,
    pub data_inventory: HashMap<String, u64>,
    pub ai_use_cases: Vec<String>,
    pub structured_data: HashMap<String, Value>,
    /// Always includes `"overall"`; every value lies in `[0.0, 1.0]`.
    pub quality_metrics: HashMap<String, f64>,
}

impl Deref for SpecializedAnalysis {
    type Target = DocumentTypeInfo;
    fn deref(&self) -> &Self::Target {
        &self.doc_type
    }
}

impl DerefMut for SpecializedAnalysis {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.doc_type
    }
}

impl SpecializedAnalysis {
    pub fn new(doc_type: DocumentTypeInfo) -> Self {
        let mut quality_metrics = HashMap::new();
        quality_metrics.insert("overall".to_string(), doc_type.confidence);

        Self {
            doc_type,
            key_findings: HashMap::new(),
            recommendations: Vec::new(),
            data_inventory: HashMap::new(),
            ai_use_cases: Vec::new(),
            structured_data: HashMap::new(),
            quality_metrics,
        }
    }

    /// Clamp every metric into `[0.0, 1.0]` and guarantee `"overall"` exists.
    /// Handlers call this as the last step of `analyze()`.
    pub fn finalize_quality(mut self, overall: f64) -> Self {
        for value in self.quality_metrics.values_mut() {
            *value = value.clamp(0.0, 1.0);
        }
        self.quality_metrics
            .entry("overall".to_string())
            .or_insert_with(|| overall.clamp(0.0, 1.0));
        self.quality_metrics.insert("overall".to_string(), overall.clamp(0.0, 1.0));
        self
    }

    /// Stamp the identity of the handler that produced this analysis.
    pub fn with_handler_used(mut self, handler: &str) -> Self {
        self.doc_type
            .metadata
            .insert("handler_used".to_string(), json!(handler));
        self
    }

    /// Flattened dict-like projection for JSON consumers, ported from
    /// `src/unified_interface.py` / `EnhancedAnalysis.to_dict`. Projection
    /// only — the struct stays composed internally.
    pub fn as_flat_json(&self) -> Value {
        json!({
            "type_name": self.doc_type.type_name,
            "confidence": self.doc_type.confidence,
            "version": self.doc_type.version,
            "schema_uri": self.doc_type.schema_uri,
            "metadata": self.doc_type.metadata,
            "key_findings": self.key_findings,
            "recommendations": self.recommendations,
            "data_inventory": self.data_inventory,
            "ai_use_cases": self.ai_use_cases,
            "structured_data": self.structured_data,
            "quality_metrics": self.quality_metrics,
        })
    }
}
