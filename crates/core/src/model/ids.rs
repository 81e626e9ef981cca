use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a generated question.
///
/// Built from the generation timestamp plus a sequence number so two questions
/// produced within the same millisecond still differ.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(String);

impl QuestionId {
    #[must_use]
    pub fn from_timestamp(unix_millis: i64, sequence: u64) -> Self {
        Self(format!("{unix_millis}-{sequence}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::QuestionId;

    #[test]
    fn sequence_distinguishes_same_millisecond() {
        let a = QuestionId::from_timestamp(1_700_000_000_000, 1);
        let b = QuestionId::from_timestamp(1_700_000_000_000, 2);
        assert_ne!(a, b);
        assert_eq!(a.as_str(), "1700000000000-1");
        assert_eq!(format!("{b:?}"), "QuestionId(1700000000000-2)");
    }
}
