//! Pure transition function of the quiz session.
//!
//! `apply` never performs I/O. Requests the session needs are returned as an
//! `Effect`; their results come back as events carrying the issuing `Ticket`.

use quiz_core::model::{GuidanceSequence, OPTION_COUNT, Question};

use crate::guidance_generator::CONSOLATION_MESSAGE;

use super::state::{Feedback, Phase, SessionState, Ticket};

/// Inputs to the session: learner actions and request results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// Load the first question of a fresh session.
    Begin,
    SelectOption(usize),
    Submit,
    AdvanceHint,
    NextQuestion,
    /// Tear the session down; the shell returns to setup.
    Reset,
    QuestionLoaded {
        ticket: Ticket,
        question: Question,
        fallback: bool,
    },
    GuidanceLoaded {
        ticket: Ticket,
        hints: Vec<String>,
    },
    GuidanceFailed {
        ticket: Ticket,
    },
}

/// Outstanding request the session is waiting on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    FetchQuestion {
        ticket: Ticket,
    },
    FetchGuidance {
        ticket: Ticket,
        question: Question,
        wrong_option: String,
    },
}

impl Effect {
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        match self {
            Effect::FetchQuestion { ticket } | Effect::FetchGuidance { ticket, .. } => *ticket,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub effect: Option<Effect>,
}

impl Transition {
    fn settled(state: SessionState) -> Self {
        Self {
            state,
            effect: None,
        }
    }
}

/// Applies one event. Events that are not legal in the current phase, and
/// results whose ticket is not the pending one, leave the state unchanged.
#[must_use]
pub fn apply(state: SessionState, event: SessionEvent) -> Transition {
    match event {
        SessionEvent::Begin => begin(state),
        SessionEvent::SelectOption(index) => select_option(state, index),
        SessionEvent::Submit => submit(state),
        SessionEvent::AdvanceHint => advance_hint(state),
        SessionEvent::NextQuestion => next_question(state),
        SessionEvent::Reset => reset(state),
        SessionEvent::QuestionLoaded {
            ticket,
            question,
            fallback,
        } => question_loaded(state, ticket, question, fallback),
        SessionEvent::GuidanceLoaded { ticket, hints } => guidance_loaded(state, ticket, hints),
        SessionEvent::GuidanceFailed { ticket } => guidance_failed(state, ticket),
    }
}

fn issue_ticket(state: &mut SessionState) -> Ticket {
    state.generation += 1;
    let ticket = Ticket::new(state.generation);
    state.pending = Some(ticket);
    ticket
}

fn fetch_question(mut state: SessionState) -> Transition {
    state.question = None;
    state.selected_option = None;
    state.guidance = None;
    state.feedback = None;
    state.phase = Phase::Loading;
    let ticket = issue_ticket(&mut state);
    Transition {
        state,
        effect: Some(Effect::FetchQuestion { ticket }),
    }
}

fn begin(state: SessionState) -> Transition {
    if state.phase != Phase::Loading || state.pending.is_some() || state.question.is_some() {
        tracing::debug!(phase = ?state.phase, "begin ignored");
        return Transition::settled(state);
    }
    fetch_question(state)
}

fn select_option(mut state: SessionState, index: usize) -> Transition {
    if state.can_select() && index < OPTION_COUNT {
        state.selected_option = Some(index);
    }
    Transition::settled(state)
}

fn submit(mut state: SessionState) -> Transition {
    if !state.can_submit() {
        return Transition::settled(state);
    }
    let (Some(question), Some(selected)) = (state.question.as_ref(), state.selected_option) else {
        return Transition::settled(state);
    };

    if question.is_correct(selected) {
        let explanation = question.explanation().to_string();
        state.score.record_correct();
        state.feedback = Some(Feedback::Explanation(explanation));
        state.phase = Phase::Correct;
        return Transition::settled(state);
    }

    let question = question.clone();
    let wrong_option = question.option(selected).unwrap_or_default().to_string();
    state.score.record_incorrect();
    state.phase = Phase::Incorrect;
    let ticket = issue_ticket(&mut state);
    Transition {
        state,
        effect: Some(Effect::FetchGuidance {
            ticket,
            question,
            wrong_option,
        }),
    }
}

fn advance_hint(mut state: SessionState) -> Transition {
    if state.phase == Phase::Guidance {
        if let Some(guidance) = state.guidance.as_mut() {
            guidance.advance();
        }
    }
    Transition::settled(state)
}

fn next_question(state: SessionState) -> Transition {
    if !state.can_request_next() {
        tracing::debug!(phase = ?state.phase, "next question ignored");
        return Transition::settled(state);
    }
    fetch_question(state)
}

fn reset(state: SessionState) -> Transition {
    Transition::settled(SessionState {
        generation: state.generation + 1,
        ..SessionState::new()
    })
}

fn is_current(state: &SessionState, ticket: Ticket, phase: Phase) -> bool {
    let current = state.pending == Some(ticket) && state.phase == phase;
    if !current {
        tracing::debug!(
            generation = ticket.generation(),
            current = state.generation,
            "dropping stale result"
        );
    }
    current
}

fn question_loaded(
    mut state: SessionState,
    ticket: Ticket,
    question: Question,
    fallback: bool,
) -> Transition {
    if !is_current(&state, ticket, Phase::Loading) {
        return Transition::settled(state);
    }
    tracing::info!(question_id = %question.id(), fallback, "question ready");
    state.question = Some(question);
    state.phase = Phase::Answering;
    state.pending = None;
    Transition::settled(state)
}

fn guidance_loaded(mut state: SessionState, ticket: Ticket, hints: Vec<String>) -> Transition {
    if !is_current(&state, ticket, Phase::Incorrect) {
        return Transition::settled(state);
    }
    state.guidance = Some(GuidanceSequence::new(hints));
    state.phase = Phase::Guidance;
    state.pending = None;
    Transition::settled(state)
}

fn guidance_failed(mut state: SessionState, ticket: Ticket) -> Transition {
    if !is_current(&state, ticket, Phase::Incorrect) {
        return Transition::settled(state);
    }
    state.feedback = Some(Feedback::Consolation(CONSOLATION_MESSAGE.to_string()));
    state.pending = None;
    Transition::settled(state)
}
