use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{Configuration, GuidanceSequence, Question, Score};

use crate::completion::CompletionService;
use crate::guidance_generator::GuidanceGenerator;
use crate::question_generator::QuestionGenerator;

use super::machine::{self, Effect, SessionEvent, Transition};
use super::state::{Feedback, Phase, SessionState};

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One learner's practice session: a fixed configuration plus the evolving state.
///
/// Every mutation goes through `dispatch`, which feeds the event to the
/// transition function and returns the request the session now waits on, if any.
#[derive(Debug, Clone)]
pub struct QuizSession {
    config: Configuration,
    state: SessionState,
}

impl QuizSession {
    #[must_use]
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            state: SessionState::new(),
        }
    }

    /// Apply an event and return the request to run next, if any.
    ///
    /// Results of requests that are no longer current are dropped here.
    pub fn dispatch(&mut self, event: SessionEvent) -> Option<Effect> {
        let state = std::mem::take(&mut self.state);
        let Transition { state, effect } = machine::apply(state, event);
        self.state = state;
        effect
    }

    pub fn select_option(&mut self, index: usize) {
        let _ = self.dispatch(SessionEvent::SelectOption(index));
    }

    pub fn advance_hint(&mut self) {
        let _ = self.dispatch(SessionEvent::AdvanceHint);
    }

    /// Discard all session state and hand back the configuration for setup.
    pub fn reset_session(&mut self) -> Configuration {
        let _ = self.dispatch(SessionEvent::Reset);
        tracing::info!("session reset");
        self.config.clone()
    }

    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.state.question()
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        self.state.selected_option()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.state.score()
    }

    #[must_use]
    pub fn guidance(&self) -> Option<&GuidanceSequence> {
        self.state.guidance()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.state.feedback()
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Runs session requests against the completion service.
///
/// Generation failures never escape: a failed question becomes the fallback
/// question and failed guidance becomes the consolation message.
#[derive(Clone)]
pub struct QuizSessionService {
    questions: QuestionGenerator,
    guidance: GuidanceGenerator,
}

impl QuizSessionService {
    #[must_use]
    pub fn new(completion: Arc<dyn CompletionService>, clock: Clock) -> Self {
        Self {
            questions: QuestionGenerator::new(Arc::clone(&completion), clock),
            guidance: GuidanceGenerator::new(completion),
        }
    }

    /// Start a session and wait for its first question.
    pub async fn start_session(&self, config: Configuration) -> QuizSession {
        tracing::info!(
            level = %config.level(),
            year = config.year(),
            topic = config.topic(),
            "starting session"
        );
        let mut session = QuizSession::new(config);
        self.drive(&mut session, SessionEvent::Begin).await;
        session
    }

    /// Submit the selected option, waiting for guidance when the answer is wrong.
    pub async fn submit_answer(&self, session: &mut QuizSession) {
        self.drive(session, SessionEvent::Submit).await;
    }

    /// Move on to a fresh question, waiting until it is loaded.
    pub async fn next_question(&self, session: &mut QuizSession) {
        self.drive(session, SessionEvent::NextQuestion).await;
    }

    /// Dispatch an event and run the resulting requests until the session settles.
    pub async fn drive(&self, session: &mut QuizSession, event: SessionEvent) {
        let mut next = session.dispatch(event);
        while let Some(effect) = next {
            let result = self.run_effect(session.configuration(), effect).await;
            next = session.dispatch(result);
        }
    }

    /// Perform one request and turn its outcome into the event to dispatch.
    ///
    /// Does not touch any session, so shells may run it on a separate task and
    /// dispatch the returned event whenever it completes.
    pub async fn run_effect(&self, config: &Configuration, effect: Effect) -> SessionEvent {
        match effect {
            Effect::FetchQuestion { ticket } => {
                match self.questions.request_question(config).await {
                    Ok(question) => SessionEvent::QuestionLoaded {
                        ticket,
                        question,
                        fallback: false,
                    },
                    Err(err) => {
                        tracing::warn!(kind = ?err.kind(), error = %err, "question generation failed, using fallback");
                        SessionEvent::QuestionLoaded {
                            ticket,
                            question: Question::fallback(config, self.questions.next_id()),
                            fallback: true,
                        }
                    }
                }
            }
            Effect::FetchGuidance {
                ticket,
                question,
                wrong_option,
            } => match self
                .guidance
                .request_guidance(config, &question, &wrong_option)
                .await
            {
                Ok(hints) => SessionEvent::GuidanceLoaded { ticket, hints },
                Err(err) => {
                    tracing::warn!(kind = ?err.kind(), error = %err, "guidance generation failed");
                    SessionEvent::GuidanceFailed { ticket }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedCompletion, question_reply};
    use quiz_core::model::Level;
    use quiz_core::time::fixed_clock;

    fn config() -> Configuration {
        Configuration::new(Level::Havo, 4, "Acids and bases").unwrap()
    }

    #[tokio::test]
    async fn run_effect_does_not_need_the_session() {
        let completion = Arc::new(ScriptedCompletion::new().reply(question_reply(1)));
        let service = QuizSessionService::new(completion, fixed_clock());
        let mut session = QuizSession::new(config());

        let effect = session.dispatch(SessionEvent::Begin).unwrap();
        let result = service.run_effect(&config(), effect).await;
        assert!(session.dispatch(result).is_none());

        assert_eq!(session.phase(), Phase::Answering);
        assert_eq!(session.question().unwrap().correct_index(), 1);
    }

    #[tokio::test]
    async fn result_arriving_after_reset_is_dropped() {
        let completion = Arc::new(ScriptedCompletion::new().reply(question_reply(1)));
        let service = QuizSessionService::new(completion, fixed_clock());
        let mut session = QuizSession::new(config());

        let effect = session.dispatch(SessionEvent::Begin).unwrap();
        let returned = session.reset_session();
        let result = service.run_effect(&config(), effect).await;
        let _ = session.dispatch(result);

        assert_eq!(returned, config());
        assert_eq!(session.phase(), Phase::Loading);
        assert!(session.question().is_none());
    }

    #[tokio::test]
    async fn fallback_question_is_flagged() {
        let completion = Arc::new(ScriptedCompletion::new().fail("timeout"));
        let service = QuizSessionService::new(completion, fixed_clock());
        let mut session = QuizSession::new(config());

        let effect = session.dispatch(SessionEvent::Begin).unwrap();
        let result = service.run_effect(&config(), effect).await;

        assert!(matches!(
            result,
            SessionEvent::QuestionLoaded { fallback: true, .. }
        ));
    }
}
