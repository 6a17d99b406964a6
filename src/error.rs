//! Error types for the practice tool.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our custom error.
pub type Result<T> = std::result::Result<T, MiPracticeError>;

/// Errors that can occur in the practice tool.
#[derive(Error, Debug)]
pub enum MiPracticeError {
    /// Error reading or writing files.
    #[error("I/O error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The corpus directory does not exist or is not a directory.
    #[error("Corpus path '{0}' does not exist or is not a directory")]
    InvalidCorpusPath(PathBuf),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The embedding model failed to load or to produce vectors.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// A vector's dimension does not match the index's configured dimension.
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Chat-completion API error.
    #[error("Chat API error: {0}")]
    ChatApi(String),

    /// Chat-completion response parsing error.
    #[error("Failed to parse chat response: {0}")]
    ChatParse(String),

    /// HTTP request error.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The session has no trainee turns to evaluate.
    #[error("Cannot evaluate a session without any trainee turns")]
    NothingToEvaluate,
}

impl MiPracticeError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for MiPracticeError {
    fn from(err: reqwest::Error) -> Self {
        MiPracticeError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for MiPracticeError {
    fn from(err: serde_json::Error) -> Self {
        MiPracticeError::ChatParse(err.to_string())
    }
}
