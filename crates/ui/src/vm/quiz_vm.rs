use quiz_core::model::{Configuration, Score};
use services::{Phase, QuizSession, QuizSessionService};

use crate::vm::setup_vm::SetupFormVm;

pub const LOADING_MESSAGE: &str = "Generating a new question...";
pub const INCORRECT_MESSAGE: &str =
    "Not quite right... Let's work out together how to reach the right answer!";

/// How an answer option should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Neutral,
    Selected,
    Correct,
    Wrong,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionRowVm {
    pub label: String,
    pub mark: OptionMark,
    pub enabled: bool,
}

/// Panel shown below the options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizPanelVm {
    Loading,
    Answering {
        can_submit: bool,
    },
    Correct {
        explanation: String,
    },
    Incorrect {
        message: String,
        waiting: bool,
    },
    Guidance {
        revealed: Vec<String>,
        can_advance: bool,
    },
}

pub struct QuizVm {
    session: QuizSession,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    #[must_use]
    pub fn header_label(&self) -> String {
        header_label(self.session.configuration())
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        score_label(self.session.score())
    }

    #[must_use]
    pub fn prompt_text(&self) -> Option<&str> {
        self.session.question().map(|question| question.prompt())
    }

    #[must_use]
    pub fn option_rows(&self) -> Vec<OptionRowVm> {
        let state = self.session.state();
        let Some(question) = state.question() else {
            return Vec::new();
        };
        let answering = state.phase() == Phase::Answering;
        let selected = state.selected_option();

        question
            .options()
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let mark = if answering {
                    if selected == Some(index) {
                        OptionMark::Selected
                    } else {
                        OptionMark::Neutral
                    }
                } else if question.is_correct(index) {
                    OptionMark::Correct
                } else if selected == Some(index) {
                    OptionMark::Wrong
                } else {
                    OptionMark::Neutral
                };
                OptionRowVm {
                    label: label.clone(),
                    mark,
                    enabled: answering,
                }
            })
            .collect()
    }

    #[must_use]
    pub fn panel(&self) -> QuizPanelVm {
        let state = self.session.state();
        match state.phase() {
            Phase::Loading => QuizPanelVm::Loading,
            Phase::Answering => QuizPanelVm::Answering {
                can_submit: state.can_submit(),
            },
            Phase::Correct => QuizPanelVm::Correct {
                explanation: state
                    .feedback()
                    .map(|feedback| feedback.text().to_string())
                    .unwrap_or_default(),
            },
            Phase::Incorrect => QuizPanelVm::Incorrect {
                message: state
                    .feedback()
                    .map_or_else(|| INCORRECT_MESSAGE.to_string(), |f| f.text().to_string()),
                waiting: state.is_waiting(),
            },
            Phase::Guidance => QuizPanelVm::Guidance {
                revealed: state
                    .guidance()
                    .map(|guidance| guidance.revealed().to_vec())
                    .unwrap_or_default(),
                can_advance: state.can_advance_hint(),
            },
        }
    }

    #[must_use]
    pub fn can_request_next(&self) -> bool {
        self.session.state().can_request_next()
    }

    pub fn select(&mut self, index: usize) {
        self.session.select_option(index);
    }

    pub async fn submit(&mut self, service: &QuizSessionService) {
        service.submit_answer(&mut self.session).await;
    }

    pub fn advance_hint(&mut self) {
        self.session.advance_hint();
    }

    pub async fn next_question(&mut self, service: &QuizSessionService) {
        service.next_question(&mut self.session).await;
    }

    /// Ends the session and returns a setup form prefilled with its settings.
    pub fn reset(&mut self) -> SetupFormVm {
        let config = self.session.reset_session();
        SetupFormVm::from_configuration(&config)
    }
}

/// Start a session and wrap it for display once the first question is ready.
pub async fn start_quiz(service: &QuizSessionService, config: Configuration) -> QuizVm {
    QuizVm::new(service.start_session(config).await)
}

#[must_use]
pub fn header_label(config: &Configuration) -> String {
    format!(
        "{} • Year {} • {}",
        config.level().label(),
        config.year(),
        config.topic()
    )
}

#[must_use]
pub fn score_label(score: Score) -> String {
    match score.percentage() {
        Some(pct) => format!("{}/{} ({pct}%)", score.correct(), score.total()),
        None => format!("{}/{}", score.correct(), score.total()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use quiz_core::model::Level;
    use quiz_core::time::fixed_clock;
    use services::test_support::ScriptedCompletion;

    use super::*;

    const QUESTION: &str = r#"{"question":"What is the charge of an electron?","options":["A. +1","B. 0","C. -1","D. +2"],"correctAnswer":2,"explanation":"Electrons are **negative**.","topic":"Atomic structure and the periodic table","difficulty":"vwo_year_5"}"#;

    fn service(completion: ScriptedCompletion) -> QuizSessionService {
        QuizSessionService::new(Arc::new(completion), fixed_clock())
    }

    fn config() -> Configuration {
        Configuration::new(Level::Vwo, 5, "Atomic structure and the periodic table").unwrap()
    }

    #[test]
    fn score_label_shows_percentage_after_first_answer() {
        let mut score = Score::new();
        assert_eq!(score_label(score), "0/0");
        score.record_correct();
        score.record_incorrect();
        score.record_incorrect();
        assert_eq!(score_label(score), "1/3 (33%)");
    }

    #[test]
    fn header_names_level_year_and_topic() {
        let config = Configuration::new(Level::Havo, 5, "Redox reactions").unwrap();
        assert_eq!(header_label(&config), "HAVO • Year 5 • Redox reactions");
    }

    #[tokio::test]
    async fn marks_follow_selection_then_result() {
        let service = service(
            ScriptedCompletion::new()
                .reply(QUESTION)
                .reply("1. Think about charge. 2. It is C."),
        );
        let mut vm = start_quiz(&service, config()).await;

        assert_eq!(vm.panel(), QuizPanelVm::Answering { can_submit: false });
        vm.select(0);
        let rows = vm.option_rows();
        assert_eq!(rows[0].mark, OptionMark::Selected);
        assert!(rows.iter().all(|row| row.enabled));
        assert_eq!(vm.panel(), QuizPanelVm::Answering { can_submit: true });

        vm.submit(&service).await;

        let marks: Vec<_> = vm.option_rows().iter().map(|row| row.mark).collect();
        assert_eq!(
            marks,
            vec![
                OptionMark::Wrong,
                OptionMark::Neutral,
                OptionMark::Correct,
                OptionMark::Neutral
            ]
        );
        assert!(vm.option_rows().iter().all(|row| !row.enabled));
        assert_eq!(
            vm.panel(),
            QuizPanelVm::Guidance {
                revealed: vec!["Think about charge.".to_string()],
                can_advance: true,
            }
        );
        assert!(!vm.can_request_next());

        vm.advance_hint();
        assert!(vm.can_request_next());
        assert_eq!(vm.score_label(), "0/1 (0%)");
    }

    #[tokio::test]
    async fn correct_answer_shows_explanation() {
        let service = service(ScriptedCompletion::new().reply(QUESTION));
        let mut vm = start_quiz(&service, config()).await;

        vm.select(2);
        vm.submit(&service).await;

        assert_eq!(
            vm.panel(),
            QuizPanelVm::Correct {
                explanation: "Electrons are **negative**.".to_string()
            }
        );
        assert_eq!(vm.score_label(), "1/1 (100%)");
    }

    #[tokio::test]
    async fn failed_guidance_shows_consolation() {
        let service = service(ScriptedCompletion::new().reply(QUESTION).fail("offline"));
        let mut vm = start_quiz(&service, config()).await;

        vm.select(1);
        vm.submit(&service).await;

        match vm.panel() {
            QuizPanelVm::Incorrect { message, waiting } => {
                assert_eq!(message, services::CONSOLATION_MESSAGE);
                assert!(!waiting);
            }
            other => panic!("unexpected panel: {other:?}"),
        }
        assert!(vm.can_request_next());
    }

    #[tokio::test]
    async fn reset_returns_prefilled_setup() {
        let service = service(ScriptedCompletion::new().reply(QUESTION));
        let mut vm = start_quiz(&service, config()).await;

        let form = vm.reset();

        assert_eq!(form.submit().unwrap(), config());
        assert_eq!(vm.panel(), QuizPanelVm::Loading);
        assert_eq!(vm.score_label(), "0/0");
    }
}
