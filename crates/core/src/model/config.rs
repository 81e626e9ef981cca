use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("a topic is required")]
    MissingTopic,

    #[error("year {year} is not offered for {level}")]
    YearNotAllowed { level: Level, year: u8 },

    #[error("unknown level: {raw}")]
    UnknownLevel { raw: String },
}

//
// ─── LEVEL ─────────────────────────────────────────────────────────────────────
//

/// School track the learner follows. Each track offers a fixed set of years.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Havo,
    Vwo,
}

impl Level {
    /// Years a learner on this track can pick.
    #[must_use]
    pub fn available_years(self) -> &'static [u8] {
        match self {
            Level::Havo => &[4, 5],
            Level::Vwo => &[4, 5, 6],
        }
    }

    #[must_use]
    pub fn allows_year(self, year: u8) -> bool {
        self.available_years().contains(&year)
    }

    /// Lowercase code used in difficulty tags.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Level::Havo => "havo",
            Level::Vwo => "vwo",
        }
    }

    /// Uppercase label used in prompts and headers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Level::Havo => "HAVO",
            Level::Vwo => "VWO",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Level::Havo => "Senior general secondary education",
            Level::Vwo => "Pre-university education",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Level {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "havo" | "a" => Ok(Level::Havo),
            "vwo" | "b" => Ok(Level::Vwo),
            _ => Err(ConfigurationError::UnknownLevel { raw: s.to_string() }),
        }
    }
}

//
// ─── TOPICS ────────────────────────────────────────────────────────────────────
//

/// Topics offered by the setup form.
pub const CHEMISTRY_TOPICS: [&str; 10] = [
    "Atomic structure and the periodic table",
    "Chemical bonding",
    "Stoichiometry and mole calculations",
    "Acids and bases",
    "Redox reactions",
    "Organic chemistry",
    "Thermochemistry",
    "Reaction rates and equilibrium",
    "Electrochemistry",
    "Polymers and biomolecules",
];

//
// ─── CONFIGURATION ─────────────────────────────────────────────────────────────
//

/// Learner-chosen settings for one practice session.
///
/// Validated once at construction and never changed while a session runs.
/// Deserialization goes through the same checks as [`Configuration::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    level: Level,
    year: u8,
    topic: String,
}

impl Configuration {
    /// Creates a configuration after checking the topic and year.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingTopic` for a blank topic and
    /// `ConfigurationError::YearNotAllowed` when the level does not offer `year`.
    pub fn new(
        level: Level,
        year: u8,
        topic: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(ConfigurationError::MissingTopic);
        }
        if !level.allows_year(year) {
            return Err(ConfigurationError::YearNotAllowed { level, year });
        }

        Ok(Self { level, year, topic })
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
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Tag such as `havo_year_4`, echoed back by generated questions.
    #[must_use]
    pub fn difficulty_tag(&self) -> String {
        format!("{}_year_{}", self.level.code(), self.year)
    }
}

impl<'de> Deserialize<'de> for Configuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Fields {
            level: Level,
            year: u8,
            topic: String,
        }

        let fields = Fields::deserialize(deserializer)?;
        Configuration::new(fields.level, fields.year, fields.topic)
            .map_err(serde::de::Error::custom)
    }
}
