use std::sync::Arc;

use quiz_core::model::{Configuration, Question};

use crate::completion::{CompletionRequest, CompletionService};
use crate::error::GenerationError;
use crate::parsing::split_hints;

/// Shown instead of hints when guidance cannot be generated.
pub const CONSOLATION_MESSAGE: &str = "That is not the right answer. Try thinking again about the properties of the substances in the question.";

/// Builds the prompt asking for numbered Socratic hints after a wrong answer.
#[must_use]
pub fn build_guidance_prompt(
    config: &Configuration,
    question: &Question,
    wrong_option: &str,
) -> String {
    let level = config.level().label();
    let year = config.year();
    let prompt = question.prompt();
    let correct_option = question.correct_option();

    format!(
        "A student ({level} year {year}) answered the following chemistry question incorrectly:

Question: {prompt}
Given answer: {wrong_option}
Correct answer: {correct_option}

Give Socratic guidance that leads the student step by step to the right answer. Do not give the answer directly; ask questions that make the student think.

Give 3-4 guiding questions/hints in this format:
1. [First hint/question]
2. [Second hint/question]
3. [Third hint/question]
4. [Final explanation]

Only the final item may state the answer. Pitch it at the student's level."
    )
}

/// Requests Socratic hint sequences from the completion service.
#[derive(Clone)]
pub struct GuidanceGenerator {
    completion: Arc<dyn CompletionService>,
}

impl GuidanceGenerator {
    #[must_use]
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    /// Generate hints for a wrong answer, in reveal order.
    ///
    /// An empty list is a valid result.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the service call fails. No retry is attempted.
    pub async fn request_guidance(
        &self,
        config: &Configuration,
        question: &Question,
        wrong_option: &str,
    ) -> Result<Vec<String>, GenerationError> {
        let prompt = build_guidance_prompt(config, question, wrong_option);
        let reply = self
            .completion
            .complete(CompletionRequest::smart(prompt))
            .await?;

        let hints = split_hints(&reply);
        if hints.is_empty() {
            tracing::debug!(reply_len = reply.len(), "guidance reply held no hints");
        }
        Ok(hints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationErrorKind;
    use crate::test_support::ScriptedCompletion;
    use quiz_core::model::{Level, QuestionId};

    fn config() -> Configuration {
        Configuration::new(Level::Vwo, 6, "Redox reactions").unwrap()
    }

    fn question() -> Question {
        Question::new(
            QuestionId::from_timestamp(1, 1),
            "Which species is oxidised?",
            vec![
                "A. Cu2+".into(),
                "B. Zn".into(),
                "C. SO4 2-".into(),
                "D. H2O".into(),
            ],
            1,
            "Zn loses electrons.",
            "Redox reactions",
            "vwo_year_6",
        )
        .unwrap()
    }

    #[test]
    fn prompt_names_wrong_and_correct_options() {
        let prompt = build_guidance_prompt(&config(), &question(), "A. Cu2+");
        assert!(prompt.contains("VWO year 6"));
        assert!(prompt.contains("Question: Which species is oxidised?"));
        assert!(prompt.contains("Given answer: A. Cu2+"));
        assert!(prompt.contains("Correct answer: B. Zn"));
        assert!(prompt.contains("4. [Final explanation]"));
    }

    #[tokio::test]
    async fn reply_is_split_into_hints() {
        let completion = Arc::new(ScriptedCompletion::new().reply(
            "1. What happens to electrons in oxidation?\n2. Which species loses electrons?\n3. Zn is oxidised.",
        ));
        let generator = GuidanceGenerator::new(completion);

        let hints = generator
            .request_guidance(&config(), &question(), "A. Cu2+")
            .await
            .unwrap();

        assert_eq!(hints.len(), 3);
        assert_eq!(hints[2], "Zn is oxidised.");
    }

    #[tokio::test]
    async fn empty_reply_is_an_empty_sequence() {
        let completion = Arc::new(ScriptedCompletion::new().reply("   "));
        let generator = GuidanceGenerator::new(completion);

        let hints = generator
            .request_guidance(&config(), &question(), "A. Cu2+")
            .await
            .unwrap();

        assert!(hints.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_propagated() {
        let completion = Arc::new(ScriptedCompletion::new().fail("503"));
        let generator = GuidanceGenerator::new(completion);

        let err = generator
            .request_guidance(&config(), &question(), "A. Cu2+")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), GenerationErrorKind::Transport);
    }
}
