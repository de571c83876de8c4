//! Library error type

use thiserror::Error;

/// Failures that can escape an analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The caller cancelled graph construction; no partial graph is kept
    #[error("analysis cancelled while building the resource graph")]
    Cancelled,

    #[error("failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The resource list could not be decoded
    #[error("invalid resource input: {0}")]
    Input(String),

    #[error("invalid configuration in {path}: {message}")]
    Config { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
