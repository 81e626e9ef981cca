use chrono::{DateTime, Utc};

/// Where question ids get their timestamp from.
///
/// `System` reads the wall clock; `Fixed` pins every reading to one instant so
/// generated ids are predictable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }

    /// Milliseconds since the Unix epoch, the prefix of every `QuestionId`.
    #[must_use]
    pub fn unix_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Seconds since the epoch that `fixed_clock` is pinned to (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if `FIXED_TEST_TIMESTAMP` is out of chrono's range.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Clock used by tests that assert on question ids.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
