/// Running tally of answered questions in a session.
///
/// Counts only grow; a fresh session starts a fresh score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    correct: u32,
    total: u32,
}

impl Score {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn record_correct(&mut self) {
        self.correct = self.correct.saturating_add(1);
        self.total = self.total.saturating_add(1);
    }

    pub fn record_incorrect(&mut self) {
        self.total = self.total.saturating_add(1);
    }

    /// Rounded share of correct answers, or `None` before the first answer.
    #[must_use]
    pub fn percentage(&self) -> Option<u32> {
        if self.total == 0 {
            return None;
        }
        let pct = (f64::from(self.correct) / f64::from(self.total) * 100.0).round();
        // Bounded to 0..=100 by construction.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pct = pct as u32;
        Some(pct)
    }
}

#[cfg(test)]
mod tests {
    use super::Score;

    #[test]
    fn counts_only_grow() {
        let mut score = Score::new();
        assert_eq!(score.percentage(), None);

        score.record_correct();
        score.record_incorrect();
        score.record_correct();

        assert_eq!(score.correct(), 2);
        assert_eq!(score.total(), 3);
        assert_eq!(score.percentage(), Some(67));
    }
}
