//! Game configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {}", .problems.join("; "))]
    Invalid { problems: Vec<String> },
}

/// Settings of the question/answer cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Answers per round before the stats screen.
    pub words_per_round: usize,
    /// Pause on the correct/incorrect/skipped feedback, in milliseconds.
    pub feedback_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            words_per_round: 20,
            feedback_delay_ms: 1500,
        }
    }
}

impl GameConfig {
    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolybasicConfig {
    /// Language the learner already speaks.
    pub source_language_id: String,
    /// Transitions kept in each driver's history.
    pub history_limit: usize,
    pub game: GameConfig,
}

impl Default for PolybasicConfig {
    fn default() -> Self {
        Self {
            source_language_id: "en".to_string(),
            history_limit: crate::core::DEFAULT_HISTORY_LIMIT,
            game: GameConfig::default(),
        }
    }
}

impl PolybasicConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check every field, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: Vec<Validation<(), NonEmptyVec<String>>> = vec![
            if self.source_language_id.trim().is_empty() {
                Validation::fail("source_language_id must not be empty".to_string())
            } else {
                Validation::success(())
            },
            if self.game.words_per_round == 0 {
                Validation::fail("game.words_per_round must be at least 1".to_string())
            } else {
                Validation::success(())
            },
        ];

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(problems) => Err(ConfigError::Invalid {
                problems: problems.iter().cloned().collect(),
            }),
        }
    }
}
