//! Console front-end configuration.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file was not valid TOML for [`ConsoleConfig`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The file parsed but a semantic constraint failed.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for the interactive console front-end.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Prefix that marks an input line as a command (e.g. `-help`).
    pub prefix: String,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Name reported for the console sender.
    pub sender_name: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prefix: "-".to_string(),
            log_filter: "info".to_string(),
            sender_name: "console".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Load and validate a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: ConsoleConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix.is_empty() {
            return Err(ConfigError::Invalid("prefix must not be empty".into()));
        }
        if self.prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(
                "prefix must not contain whitespace".into(),
            ));
        }
        if self.sender_name.is_empty() {
            return Err(ConfigError::Invalid("sender_name must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.prefix, "-");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prefix = \"!\"\nsender_name = \"ops\"").unwrap();
        let config = ConsoleConfig::load(file.path()).unwrap();
        assert_eq!(config.prefix, "!");
        assert_eq!(config.sender_name, "ops");
        // Unset fields fall back to defaults
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        let config = ConsoleConfig {
            prefix: String::new(),
            ..ConsoleConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
