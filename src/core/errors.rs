//! Error types for the risk-scoring engine.

use thiserror::Error;

/// Errors surfaced at the analysis boundary.
///
/// Scoring itself is a total function over valid input; the only failure
/// surfaces are input validation before the pipeline runs and configuration
/// handling. A zero-transaction wallet is a valid, fully-scored state and
/// never produces an error.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Malformed wallet address or structurally invalid transaction/token
    /// record. Raised before any scoring begins; no partial record exists.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Scoring configuration failed validation.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error while loading or saving a configuration file.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error while loading or saving a configuration file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used across the engine.
pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    /// True when the error was caused by caller-supplied wallet data rather
    /// than configuration or the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
