use serde::Serialize;
use thiserror::Error;

use crate::model::config::Configuration;
use crate::model::ids::QuestionId;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("expected {OPTION_COUNT} options, got {count}")]
    OptionCount { count: usize },

    #[error("correct answer index {index} is out of range")]
    CorrectIndexOutOfRange { index: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice quiz item.
///
/// Always has exactly four options and a correct index pointing at one of them.
/// Questions are replaced wholesale, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_index: usize,
    explanation: String,
    topic: String,
    difficulty: String,
}

impl Question {
    /// Creates a question, enforcing the option count and correct index.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt is blank, the option count is not four
    /// or `correct_index` does not point at an option.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: impl Into<String>,
        topic: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        Self::check_parts(&prompt, options.len(), correct_index)?;

        let count = options.len();
        let options: [String; OPTION_COUNT] = options
            .try_into()
            .map_err(|_| QuestionError::OptionCount { count })?;

        Ok(Self {
            id,
            prompt,
            options,
            correct_index,
            explanation: explanation.into(),
            topic: topic.into(),
            difficulty: difficulty.into(),
        })
    }

    /// Checks the parts of a question before anything is built from them.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Question::new`], checked in the same order.
    pub fn check_parts(
        prompt: &str,
        option_count: usize,
        correct_index: usize,
    ) -> Result<(), QuestionError> {
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if option_count != OPTION_COUNT {
            return Err(QuestionError::OptionCount {
                count: option_count,
            });
        }
        if correct_index >= OPTION_COUNT {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_index,
            });
        }
        Ok(())
    }

    /// Static question used whenever generation fails.
    #[must_use]
    pub fn fallback(config: &Configuration, id: QuestionId) -> Self {
        Self {
            id,
            prompt: "What is the chemical formula of water?".to_string(),
            options: [
                "A. H2O".to_string(),
                "B. CO2".to_string(),
                "C. NaCl".to_string(),
                "D. CH4".to_string(),
            ],
            correct_index: 0,
            explanation: "Water has the chemical formula H2O: two hydrogen atoms bonded to one oxygen atom."
                .to_string(),
            topic: config.topic().to_string(),
            difficulty: config.difficulty_tag(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }
}
