//! Settings file (cubeattr.toml)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Discovery request settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    /// Give up on a discovery request after this many milliseconds
    pub timeout_ms: u64,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self { timeout_ms: 10_000 }
    }
}

impl DiscoverySettings {
    /// Timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Wording of user-facing notices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeSettings {
    /// Title shown when attribute discovery fails
    pub failure_title: String,

    /// Message shown when attribute discovery fails
    pub failure_message: String,
}

impl Default for NoticeSettings {
    fn default() -> Self {
        Self {
            failure_title: "Woops".to_string(),
            failure_message: "Something bad happened".to_string(),
        }
    }
}

/// Main settings structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Discovery settings
    #[serde(default)]
    pub discovery: DiscoverySettings,

    /// Notice wording
    #[serde(default)]
    pub notices: NoticeSettings,
}

impl Settings {
    /// Load settings from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_toml(&contents)
    }

    /// Load settings from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save settings to TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.discovery.timeout(), Duration::from_secs(10));
        assert_eq!(settings.notices.failure_title, "Woops");
        assert_eq!(settings.notices.failure_message, "Something bad happened");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings = Settings::from_toml(
            r#"
            [discovery]
            timeout_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(settings.discovery.timeout_ms, 250);
        assert_eq!(settings.notices, NoticeSettings::default());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let result = Settings::from_toml("[discovery]\ntimeout_ms = \"soon\"");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn settings_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cubeattr.toml");

        let mut settings = Settings::default();
        settings.notices.failure_title = "Discovery failed".to_string();
        settings.save_to_file(&path).unwrap();

        assert_eq!(Settings::from_file(&path).unwrap(), settings);
    }
}
