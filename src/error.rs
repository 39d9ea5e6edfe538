//! Error types for graph construction and analysis

use thiserror::Error;

/// Errors raised by the analysis core.
///
/// Empty graphs, edgeless graphs and empty path distributions are valid
/// outcomes and never produce an error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    /// Malformed point data (non-finite coordinates, duplicate identifiers, missing cells).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Caller-supplied settings that cannot be honoured.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for core operations.
pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
