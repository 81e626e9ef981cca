use quiz_core::model::{CHEMISTRY_TOPICS, Configuration, ConfigurationError, Level};

/// State of the setup form shown before a session starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetupFormVm {
    level: Level,
    year: u8,
    topic: Option<String>,
}

impl Default for SetupFormVm {
    fn default() -> Self {
        Self {
            level: Level::Havo,
            year: 4,
            topic: None,
        }
    }
}

impl SetupFormVm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefills the form from a previous session's configuration.
    #[must_use]
    pub fn from_configuration(config: &Configuration) -> Self {
        Self {
            level: config.level(),
            year: config.year(),
            topic: Some(config.topic().to_string()),
        }
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn year(&self) -> u8 {
        self.year
    }

    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Switching level keeps the year when the new level offers it and
    /// otherwise falls back to the level's first year.
    pub fn set_level(&mut self, level: Level) {
        self.level = level;
        if !level.allows_year(self.year) {
            self.year = level.available_years()[0];
        }
    }

    /// Ignores years the current level does not offer.
    pub fn set_year(&mut self, year: u8) {
        if self.level.allows_year(year) {
            self.year = year;
        }
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        let topic = topic.into();
        self.topic = if topic.trim().is_empty() {
            None
        } else {
            Some(topic)
        };
    }

    /// Picks a catalogue topic by its 1-based position.
    pub fn choose_topic(&mut self, number: usize) -> bool {
        match number.checked_sub(1).and_then(|index| CHEMISTRY_TOPICS.get(index)) {
            Some(topic) => {
                self.topic = Some((*topic).to_string());
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn available_years(&self) -> &'static [u8] {
        self.level.available_years()
    }

    #[must_use]
    pub fn topics(&self) -> &'static [&'static str] {
        &CHEMISTRY_TOPICS
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.topic.is_some()
    }

    /// Builds the session configuration from the form.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingTopic` until a topic is chosen.
    pub fn submit(&self) -> Result<Configuration, ConfigurationError> {
        let topic = self.topic.clone().ok_or(ConfigurationError::MissingTopic)?;
        Configuration::new(self.level, self.year, topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_requires_a_topic() {
        let mut form = SetupFormVm::new();
        assert!(!form.can_submit());
        assert_eq!(form.submit().unwrap_err(), ConfigurationError::MissingTopic);

        form.set_topic("  ");
        assert!(!form.can_submit());

        assert!(form.choose_topic(4));
        let config = form.submit().unwrap();
        assert_eq!(config.topic(), "Acids and bases");
        assert_eq!(config.level(), Level::Havo);
        assert_eq!(config.year(), 4);
    }

    #[test]
    fn switching_level_clamps_year() {
        let mut form = SetupFormVm::new();
        form.set_level(Level::Vwo);
        form.set_year(6);
        assert_eq!(form.year(), 6);

        form.set_level(Level::Havo);
        assert_eq!(form.year(), 4);
        assert_eq!(form.available_years(), &[4, 5]);

        form.set_year(5);
        form.set_level(Level::Vwo);
        assert_eq!(form.year(), 5);
    }

    #[test]
    fn years_outside_level_are_ignored() {
        let mut form = SetupFormVm::new();
        form.set_year(6);
        assert_eq!(form.year(), 4);
    }

    #[test]
    fn topic_numbers_are_one_based() {
        let mut form = SetupFormVm::new();
        assert!(!form.choose_topic(0));
        assert!(!form.choose_topic(11));
        assert!(form.choose_topic(10));
        assert_eq!(form.topic(), Some("Polymers and biomolecules"));
    }

    #[test]
    fn prefill_round_trips_configuration() {
        let config = Configuration::new(Level::Vwo, 6, "Electrochemistry").unwrap();
        let form = SetupFormVm::from_configuration(&config);
        assert_eq!(form.submit().unwrap(), config);
    }
}
