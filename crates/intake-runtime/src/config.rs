//! Evaluator settings.
//!
//! Settings are read once at startup (usually from a YAML file) and handed
//! to [`LlmEvaluator`](crate::LlmEvaluator) by value. Every field has a
//! default, so an empty document is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::providers::CompletionConfig;

/// Errors from loading evaluator settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for the LLM evaluation path.
///
/// ```yaml
/// provider: openai
/// model: gpt-4.1-mini
/// temperature: 0.2
/// max_tokens: 800
/// timeout: 30s
/// base_url: https://api.openai.com/v1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluatorConfig {
    /// Provider type name resolved through the `ProviderRegistry`
    pub provider: String,

    /// Model identifier sent to the completion service
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens the model may generate
    pub max_tokens: u32,

    /// Upper bound on the whole completion call
    #[serde(with = "duration_str")]
    pub timeout: Duration,

    /// Override for the provider endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        let completion = CompletionConfig::default();
        Self {
            provider: "openai".to_string(),
            model: completion.model,
            temperature: completion.temperature,
            max_tokens: completion.max_tokens,
            timeout: completion.timeout,
            base_url: None,
        }
    }
}

impl EvaluatorConfig {
    /// Parse settings from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as a map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.trim().is_empty() {
            return Err(ConfigError::Invalid("provider must not be empty".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::Invalid("max_tokens must be positive".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid("timeout must be positive".to_string()));
        }
        Ok(())
    }

    /// Per-call settings for the provider.
    pub fn completion_config(&self) -> CompletionConfig {
        CompletionConfig {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            timeout: self.timeout,
        }
    }
}

/// Durations written as humantime strings (`30s`, `1m 30s`).
mod duration_str {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EvaluatorConfig::default();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.model, "gpt-4.1-mini");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, 800);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(EvaluatorConfig::from_yaml("").unwrap(), EvaluatorConfig::default());
    }

    #[test]
    fn test_sample_settings_match_defaults() {
        let sample = include_str!("../../../intake.example.yaml");
        assert_eq!(EvaluatorConfig::from_yaml(sample).unwrap(), EvaluatorConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = EvaluatorConfig::from_yaml("timeout: 1m 30s\nmodel: gpt-4o\n").unwrap();
        assert_eq!(config.timeout, Duration::from_secs(90));
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.temperature, 0.2);
    }

    #[test]
    fn test_bad_duration_rejected() {
        let err = EvaluatorConfig::from_yaml("timeout: soon\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(EvaluatorConfig::from_yaml("modle: gpt-4o\n").is_err());
    }

    #[test]
    fn test_out_of_range_temperature_rejected() {
        let err = EvaluatorConfig::from_yaml("temperature: 3.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = EvaluatorConfig::from_yaml("timeout: 0s\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_completion_config_mirrors_settings() {
        let config = EvaluatorConfig {
            model: "gpt-4o".to_string(),
            temperature: 0.0,
            max_tokens: 256,
            timeout: Duration::from_secs(5),
            ..EvaluatorConfig::default()
        };
        let completion = config.completion_config();
        assert_eq!(completion.model, "gpt-4o");
        assert_eq!(completion.temperature, 0.0);
        assert_eq!(completion.max_tokens, 256);
        assert_eq!(completion.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "provider: openai").unwrap();
        writeln!(file, "base_url: http://localhost:9999/v1").unwrap();

        let config = EvaluatorConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9999/v1"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EvaluatorConfig::from_yaml_file("/nonexistent/intake.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
