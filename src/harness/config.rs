use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type returned when a harness configuration cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read harness configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse harness configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("the number of repetitions must be positive")]
    ZeroRepetitions,
}

fn default_repetitions() -> usize {
    100
}

/// Parameters of the equivalence and timing harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// How often each analysis is run per chain; the fastest run counts.
    #[serde(default = "default_repetitions")]
    pub repetitions: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            repetitions: default_repetitions(),
        }
    }
}

impl HarnessConfig {
    pub fn with_repetitions(repetitions: usize) -> Result<Self, ConfigError> {
        HarnessConfig { repetitions }.validated()
    }

    /// Parse a configuration from TOML. Missing keys take their
    /// default values.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str::<HarnessConfig>(contents)?.validated()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.repetitions == 0 {
            Err(ConfigError::ZeroRepetitions)
        } else {
            Ok(self)
        }
    }
}
