/// Error taxonomy for ingestion, rendering and persistence
///
/// Every variant is fatal to the current invocation; `main` prints it and
/// exits. Nothing in the core retries.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DexError {
    #[error("file format not supported: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("malformed input in {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("report '{kind}' is missing required field '{key}'")]
    MissingReportField { kind: &'static str, key: String },

    #[error("invalid choice '{input}', expected append or overwrite")]
    InvalidChoice { input: String },

    #[error("refusing to write {}: {reason}", path.display())]
    PathConflict { path: PathBuf, reason: String },

    #[error("creature '{creature}' has no integer '{field}' value (found '{found}')")]
    InvalidStat { creature: String, field: String, found: String },

    #[error("roster too small: {reason}")]
    InsufficientRoster { reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DexError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DexError::MalformedInput { path: path.into(), reason: reason.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DexError::Io { path: path.into(), source }
    }

    /// Errors whose operator guidance includes the full usage text
    pub fn wants_usage(&self) -> bool {
        matches!(self, DexError::UnsupportedFormat { .. } | DexError::InvalidChoice { .. })
    }
}

pub type Result<T> = std::result::Result<T, DexError>;
