/// Ordered hints shown one at a time after a wrong answer.
///
/// The last hint is conventionally the full explanation. The reveal cursor
/// only moves forward and stops at the last hint. An empty sequence is valid
/// and counts as fully revealed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GuidanceSequence {
    hints: Vec<String>,
    reveal_index: usize,
}

impl GuidanceSequence {
    #[must_use]
    pub fn new(hints: Vec<String>) -> Self {
        Self {
            hints,
            reveal_index: 0,
        }
    }

    #[must_use]
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    #[must_use]
    pub fn reveal_index(&self) -> usize {
        self.reveal_index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    /// Hints revealed so far, in order.
    #[must_use]
    pub fn revealed(&self) -> &[String] {
        if self.hints.is_empty() {
            return &[];
        }
        &self.hints[..=self.reveal_index]
    }

    #[must_use]
    pub fn is_fully_revealed(&self) -> bool {
        self.reveal_index + 1 >= self.hints.len()
    }

    /// Reveals the next hint. Returns `false` when already at the last one.
    pub fn advance(&mut self) -> bool {
        if self.is_fully_revealed() {
            return false;
        }
        self.reveal_index += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::GuidanceSequence;

    fn hints(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("hint {i}")).collect()
    }

    #[test]
    fn advance_stops_at_last_hint() {
        let mut guidance = GuidanceSequence::new(hints(3));
        assert_eq!(guidance.revealed(), &["hint 1".to_string()]);

        assert!(guidance.advance());
        assert!(guidance.advance());
        assert!(!guidance.advance());
        assert!(!guidance.advance());

        assert_eq!(guidance.reveal_index(), 2);
        assert_eq!(guidance.revealed().len(), 3);
        assert!(guidance.is_fully_revealed());
    }

    #[test]
    fn empty_sequence_is_fully_revealed() {
        let mut guidance = GuidanceSequence::new(Vec::new());
        assert!(guidance.is_fully_revealed());
        assert!(!guidance.advance());
        assert_eq!(guidance.reveal_index(), 0);
        assert!(guidance.revealed().is_empty());
    }
}
