//! Game configuration schema (YAML).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameConfig {
    /// Health both participants start with.
    #[serde(default = "default_starting_health")]
    pub starting_health: u8,
    /// Fixed seed for reproducible games. Absent = OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// NDJSON transcript path. Absent = no transcript.
    #[serde(default)]
    pub transcript: Option<String>,
}

fn default_starting_health() -> u8 {
    4
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_health: default_starting_health(),
            seed: None,
            transcript: None,
        }
    }
}

impl GameConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_health < 1 {
            return Err(ConfigError::Invalid("starting_health must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_an_empty_document() {
        let config = GameConfig::from_yaml("{}").expect("empty mapping should parse");
        assert_eq!(config.starting_health, 4);
        assert_eq!(config.seed, None);
        assert_eq!(config.transcript, None);
    }

    #[test]
    fn full_document_parses() {
        let yaml = r#"
starting_health: 6
seed: 42
transcript: "games/evening.ndjson"
"#;
        let config = GameConfig::from_yaml(yaml).expect("should parse");
        assert_eq!(config.starting_health, 6);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.transcript.as_deref(), Some("games/evening.ndjson"));
    }

    #[test]
    fn invalid_yaml_fails() {
        let invalid_yaml = "this is not: valid: yaml: {{{}}}";
        assert!(GameConfig::from_yaml(invalid_yaml).is_err());
    }

    #[test]
    fn zero_starting_health_is_rejected() {
        let result = GameConfig::from_yaml("starting_health: 0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
