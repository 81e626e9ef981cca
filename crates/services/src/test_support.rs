//! Scripted completion backend for tests in this crate and its dependents.
//!
//! Enabled for `cfg(test)` and through the `test-support` feature.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::completion::{CompletionRequest, CompletionService, ModelTier};
use crate::error::GenerationError;

/// Replays canned replies in order and records every prompt it receives.
///
/// A queued failure comes back as `GenerationError::Unavailable`, as does any
/// call made after the script runs out.
#[derive(Default)]
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    #[must_use]
    pub fn fail(self, reason: impl Into<String>) -> Self {
        self.push(Err(reason.into()));
        self
    }

    /// Prompts seen so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if a previous call panicked while holding the lock.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }

    /// Replies not consumed yet.
    ///
    /// # Panics
    ///
    /// Panics if a previous call panicked while holding the lock.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replies.lock().expect("reply script poisoned").len()
    }

    fn push(&self, reply: Result<String, String>) {
        self.replies
            .lock()
            .expect("reply script poisoned")
            .push_back(reply);
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GenerationError> {
        assert_eq!(request.model_tier, ModelTier::Smart);
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(request.message);
        let next = self
            .replies
            .lock()
            .expect("reply script poisoned")
            .pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(reason)) => Err(GenerationError::Unavailable(reason)),
            None => Err(GenerationError::Unavailable("script exhausted".into())),
        }
    }
}

/// Question reply wrapped in chatter, in the shape the question prompt asks for.
#[must_use]
pub fn question_reply(correct_answer: usize) -> String {
    format!(
        "Here you go:\n{{\"question\":\"Which substance is an acid?\",\"options\":[\"A. NaOH\",\"B. HCl\",\"C. NaCl\",\"D. H2O\"],\"correctAnswer\":{correct_answer},\"explanation\":\"HCl donates protons.\",\"topic\":\"Acids and bases\",\"difficulty\":\"havo_year_4\"}}"
    )
}
