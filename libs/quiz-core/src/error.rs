//! Error types for quiz-core.

use thiserror::Error;

/// Result type alias using QuizError.
pub type Result<T> = std::result::Result<T, QuizError>;

/// Errors surfaced by catalog loading and session handling.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("invalid catalog JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("unknown region: {0}")]
    UnknownRegion(String),

    #[error("unknown list: {0}")]
    UnknownList(String),

    #[error("session already finished")]
    SessionFinished,
}
