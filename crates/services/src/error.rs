//! Shared error types for the services crate.

use quiz_core::model::QuestionError;
use thiserror::Error;

/// Why a completion reply could not be turned into structured content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("reply does not contain a JSON object")]
    NoJsonObject,
    #[error("reply JSON is malformed or incomplete: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("correct answer {index} is negative")]
    NegativeCorrectAnswer { index: i64 },
    /// The reply parsed but breaks a question invariant.
    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// Coarse classification of a `GenerationError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    /// The service call did not complete successfully.
    Transport,
    /// A reply arrived but carried no usable payload.
    Parse,
}

/// Errors emitted by the question and guidance generators.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("completion request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("completion service unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl GenerationError {
    #[must_use]
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            Self::Parse(_) => GenerationErrorKind::Parse,
            Self::HttpStatus(_) | Self::Http(_) | Self::Unavailable(_) => {
                GenerationErrorKind::Transport
            }
        }
    }
}
