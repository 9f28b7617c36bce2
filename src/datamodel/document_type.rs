//! The classification verdict produced by handler dispatch.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Classification verdict for a parsed XML document.
///
/// Mirrors the teacher's `DoclingDocument` metadata pattern: an open,
/// dynamically-typed map rather than a closed struct, since each handler's
/// domain metadata differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTypeInfo {
    pub type_name: String,
    /// Confidence in `[0.0, 1.0]`
    pub confidence: f64,
    pub version: Option<String>,
    pub schema_uri: Option<String>,
    pub metadata: HashMap<String, Value>,
}

impl DocumentTypeInfo {
    pub fn new(type_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            type_name: type_name.into(),
            confidence: confidence.clamp(0.0, 1.0),
            version: None,
            schema_uri: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_schema_uri(mut self, schema_uri: impl Into<String>) -> Self {
        self.schema_uri = Some(schema_uri.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
