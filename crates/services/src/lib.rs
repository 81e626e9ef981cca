#![forbid(unsafe_code)]

pub mod completion;
pub mod error;
pub mod guidance_generator;
pub mod parsing;
pub mod question_generator;
pub mod sessions;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use quiz_core::Clock;
pub use sessions as session;

pub use completion::{
    CompletionConfig, CompletionRequest, CompletionService, HttpCompletionService, ModelTier,
};
pub use error::{GenerationError, GenerationErrorKind, ParseError};
pub use guidance_generator::{CONSOLATION_MESSAGE, GuidanceGenerator};
pub use question_generator::QuestionGenerator;
pub use sessions::{
    Effect, Feedback, Phase, QuizSession, QuizSessionService, SessionEvent, SessionState,
};
