//! Unified error type for the faq-base crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading the corpus or the selector configuration.
///
/// Selection itself never fails; generator failures are handled inside the
/// selector and never surface here.
#[derive(Debug, Error)]
pub enum FaqBaseError {
    // ── Configuration / environment ──────────────────────────────────────────
    /// Failed to parse an environment variable into the expected type.
    #[error("failed to parse env variable: {key} = '{value}'")]
    EnvParse { key: String, value: String },

    /// Configuration value or combination is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Corpus ──────────────────────────────────────────────────────────────
    /// The corpus file does not exist.
    #[error("corpus file not found: {}", path.display())]
    CorpusNotFound { path: PathBuf },

    /// A corpus line is not a JSON object with `instruction` and `response`.
    #[error("malformed corpus record on line {line}: {source}")]
    CorpusParse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A corpus line is not valid UTF-8.
    #[error("corpus line {line} is not valid UTF-8: {source}")]
    CorpusEncoding {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    // ── I/O & JSON ──────────────────────────────────────────────────────────
    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error outside the corpus (e.g. keyword file).
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
