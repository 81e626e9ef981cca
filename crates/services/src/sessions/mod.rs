mod machine;
mod service;
mod state;

// Public API of the session subsystem.
pub use machine::{Effect, SessionEvent, Transition, apply};
pub use service::{QuizSession, QuizSessionService};
pub use state::{Feedback, Phase, SessionState, Ticket};
