use quiz_core::model::{GuidanceSequence, Question, Score};

/// Interaction phase of a quiz session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Answering,
    Correct,
    Incorrect,
    Guidance,
}

/// Identifies the request a session is waiting on.
///
/// Results carrying any other ticket are stale and get dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    pub(crate) fn new(generation: u64) -> Self {
        Self { generation }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Message shown under the question once it has been answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    /// The question's own explanation, after a correct answer.
    Explanation(String),
    /// Static message used when no hints could be generated.
    Consolation(String),
}

impl Feedback {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Feedback::Explanation(text) | Feedback::Consolation(text) => text,
        }
    }
}

/// Everything a session knows at one point in time.
///
/// Only `machine::apply` produces new states; everyone else reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) question: Option<Question>,
    pub(crate) selected_option: Option<usize>,
    pub(crate) phase: Phase,
    pub(crate) score: Score,
    pub(crate) guidance: Option<GuidanceSequence>,
    pub(crate) feedback: Option<Feedback>,
    pub(crate) generation: u64,
    pub(crate) pending: Option<Ticket>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            question: None,
            selected_option: None,
            phase: Phase::Loading,
            score: Score::new(),
            guidance: None,
            feedback: None,
            generation: 0,
            pending: None,
        }
    }

    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn guidance(&self) -> Option<&GuidanceSequence> {
        self.guidance.as_ref()
    }

    /// All hints of the current guidance sequence, revealed or not.
    #[must_use]
    pub fn hints(&self) -> &[String] {
        match &self.guidance {
            Some(guidance) => guidance.hints(),
            None => &[],
        }
    }

    #[must_use]
    pub fn reveal_index(&self) -> Option<usize> {
        self.guidance.as_ref().map(GuidanceSequence::reveal_index)
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn pending(&self) -> Option<Ticket> {
        self.pending
    }

    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn can_select(&self) -> bool {
        self.phase == Phase::Answering && self.question.is_some()
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.can_select() && self.selected_option.is_some()
    }

    #[must_use]
    pub fn can_advance_hint(&self) -> bool {
        self.phase == Phase::Guidance
            && self
                .guidance
                .as_ref()
                .is_some_and(|guidance| !guidance.is_fully_revealed())
    }

    #[must_use]
    pub fn can_request_next(&self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        match self.phase {
            Phase::Correct | Phase::Incorrect => true,
            Phase::Guidance => self
                .guidance
                .as_ref()
                .is_none_or(GuidanceSequence::is_fully_revealed),
            Phase::Loading | Phase::Answering => false,
        }
    }
}
