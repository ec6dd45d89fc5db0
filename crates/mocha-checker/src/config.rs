//! Checker configuration
//!
//! Controls which method is treated as the program entry point. Usually
//! built with [`CheckerConfig::default`], or read from a TOML table:
//!
//! ```toml
//! entry_class = "Main"
//! entry_method = "main"
//! require_entry_point = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read checker config: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse checker config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Parsed but not usable
    #[error("Invalid checker config: {0}")]
    ValidationError(String),
}

/// Settings for a single analysis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerConfig {
    /// Class that must hold the entry method
    pub entry_class: String,
    /// Name of the static, void, zero-argument entry method
    pub entry_method: String,
    /// Report `MissingEntryPoint` when no entry method is found
    pub require_entry_point: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            entry_class: "Main".to_string(),
            entry_method: "main".to_string(),
            require_entry_point: true,
        }
    }
}

impl CheckerConfig {
    /// Configuration for library units that have no entry point
    pub fn library() -> Self {
        CheckerConfig {
            require_entry_point: false,
            ..Self::default()
        }
    }

    /// Parse a configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a configuration from TOML text; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CheckerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [("entry_class", &self.entry_class), ("entry_method", &self.entry_method)] {
            if value.is_empty() {
                return Err(ConfigError::ValidationError(format!("{} cannot be empty", key)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckerConfig::default();
        assert_eq!(config.entry_class, "Main");
        assert_eq!(config.entry_method, "main");
        assert!(config.require_entry_point);
        assert!(!CheckerConfig::library().require_entry_point);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CheckerConfig::from_toml_str("entry_method = \"start\"").unwrap();
        assert_eq!(config.entry_class, "Main");
        assert_eq!(config.entry_method, "start");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = CheckerConfig::from_toml_str("entry = \"Main\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = CheckerConfig::from_toml_str("entry_class = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
