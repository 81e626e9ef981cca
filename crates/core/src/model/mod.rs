mod config;
mod guidance;
mod ids;
mod question;
mod score;

pub use config::{CHEMISTRY_TOPICS, Configuration, ConfigurationError, Level};
pub use guidance::GuidanceSequence;
pub use ids::QuestionId;
pub use question::{OPTION_COUNT, Question, QuestionError};
pub use score::Score;
