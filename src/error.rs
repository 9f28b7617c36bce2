//! Error taxonomy for the analysis and chunking pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Sub-kind of a parse failure, per the parsing safety contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// XML is not well-formed
    Malformed,
    /// An external entity or external DTD subset was rejected
    UnsafeEntity,
    /// An entity expansion bomb (e.g. billion laughs) was detected
    XmlBomb,
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ParseErrorKind::Malformed => "malformed",
            ParseErrorKind::UnsafeEntity => "unsafe-entity",
            ParseErrorKind::XmlBomb => "xml-bomb",
        };
        f.write_str(s)
    }
}

/// Errors surfaced by the core engine
#[derive(Debug, Error)]
pub enum XmlInsightError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file {path} ({size_bytes} bytes) exceeds configured ceiling of {limit_bytes} bytes")]
    Size {
        path: PathBuf,
        size_bytes: u64,
        limit_bytes: u64,
    },

    #[error("failed to parse {path}: {kind} — {message}")]
    Parse {
        path: PathBuf,
        kind: ParseErrorKind,
        message: String,
    },

    #[error("handler '{handler}' failed analyzing {path}: {message}")]
    Analysis {
        path: PathBuf,
        handler: String,
        message: String,
    },

    #[error("chunking invariant violated: {0}")]
    Chunking(String),
}

impl XmlInsightError {
    pub fn parse(path: impl Into<PathBuf>, kind: ParseErrorKind, message: impl Into<String>) -> Self {
        XmlInsightError::Parse {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn analysis(path: impl Into<PathBuf>, handler: impl Into<String>, message: impl Into<String>) -> Self {
        XmlInsightError::Analysis {
            path: path.into(),
            handler: handler.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, XmlInsightError>;
