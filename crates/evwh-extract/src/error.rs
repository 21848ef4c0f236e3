//! Error types for evwh-extract

use thiserror::Error;

/// Extraction errors
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Transport-level HTTP failure (X001)
    #[error("[X001] Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Source answered with a non-success status (X002)
    #[error("[X002] Source unavailable: {url} returned HTTP {status}")]
    SourceUnavailable { url: String, status: u16 },

    /// Malformed CSV (X003)
    #[error("[X003] CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error with file path context (X004)
    #[error("[X004] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// CSV payload without a header row (X005)
    #[error("[X005] CSV payload has no header row")]
    MissingHeader,
}

/// Result type alias for ExtractError
pub type ExtractResult<T> = Result<T, ExtractError>;
