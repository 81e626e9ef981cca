use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use quiz_core::Clock;
use quiz_core::model::{Configuration, Question, QuestionId};

use crate::completion::{CompletionRequest, CompletionService};
use crate::error::{GenerationError, ParseError};
use crate::parsing::parse_question_payload;

/// Builds the prompt asking for one multiple-choice question as JSON.
#[must_use]
pub fn build_question_prompt(config: &Configuration) -> String {
    let level = config.level().label();
    let year = config.year();
    let topic = config.topic();
    let difficulty = config.difficulty_tag();

    format!(
        r#"Generate a chemistry multiple choice question for {level} year {year} on the topic "{topic}".

The question must:
- Suit the level ({level} year {year})
- Be about: {topic}
- Have 4 answer options (A, B, C, D)
- Be clear and unambiguous
- Come with a good explanation of why the answer is correct

Return the answer in exactly this JSON format, as a single JSON object:
{{
  "question": "The question here...",
  "options": ["A. Option 1", "B. Option 2", "C. Option 3", "D. Option 4"],
  "correctAnswer": 0,
  "explanation": "Why this answer is correct...",
  "topic": "{topic}",
  "difficulty": "{difficulty}"
}}

correctAnswer is the 0-based index of the correct option."#
    )
}

/// Requests quiz questions from the completion service.
#[derive(Clone)]
pub struct QuestionGenerator {
    completion: Arc<dyn CompletionService>,
    clock: Clock,
    sequence: Arc<AtomicU64>,
}

impl QuestionGenerator {
    #[must_use]
    pub fn new(completion: Arc<dyn CompletionService>, clock: Clock) -> Self {
        Self {
            completion,
            clock,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Next question id, derived from the clock and a per-generator sequence.
    #[must_use]
    pub fn next_id(&self) -> QuestionId {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        QuestionId::from_timestamp(self.clock.unix_millis(), sequence)
    }

    /// Generate a question for the configuration.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the service call fails or the reply does not
    /// hold a valid question. No retry is attempted.
    pub async fn request_question(
        &self,
        config: &Configuration,
    ) -> Result<Question, GenerationError> {
        let prompt = build_question_prompt(config);
        let reply = self
            .completion
            .complete(CompletionRequest::smart(prompt))
            .await?;

        let payload = parse_question_payload(&reply).inspect_err(|err| {
            tracing::warn!(reply_len = reply.len(), error = %err, "unusable question reply");
        })?;

        let topic = payload
            .topic
            .filter(|topic| !topic.trim().is_empty())
            .unwrap_or_else(|| config.topic().to_string());
        let difficulty = payload
            .difficulty
            .filter(|difficulty| !difficulty.trim().is_empty())
            .unwrap_or_else(|| config.difficulty_tag());

        let question = Question::new(
            self.next_id(),
            payload.question,
            payload.options,
            payload.correct_answer,
            payload.explanation,
            topic,
            difficulty,
        )
        .map_err(ParseError::from)?;

        Ok(question)
    }
}
