// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks ranges and non-empty strings that serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::AssistConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &AssistConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let threshold = config.intent.threshold;
    if !(0.0..=1.0).contains(&threshold) {
        errors.push(ConfigError::Validation {
            message: format!("intent.threshold must be between 0.0 and 1.0, got {threshold}"),
        });
    }

    let temperature = config.gemini.classify_temperature;
    if !(0.0..=2.0).contains(&temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "gemini.classify_temperature must be between 0.0 and 2.0, got {temperature}"
            ),
        });
    }

    if config.gemini.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.model must not be empty".to_string(),
        });
    }

    let base_url = config.gemini.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("gemini.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.gemini.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.timeout_secs must be at least 1".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` is not one of {}",
                config.agent.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.search.instruction.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "search.instruction must not be empty".to_string(),
        });
    }

    if let Some(path) = &config.knowledge.faq_file
        && path.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "knowledge.faq_file must not be empty when set".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        let config = AssistConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn threshold_out_of_range_fails() {
        let mut config = AssistConfig::default();
        config.intent.threshold = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "intent.threshold"));
    }

    #[test]
    fn negative_temperature_fails() {
        let mut config = AssistConfig::default();
        config.gemini.classify_temperature = -0.1;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "classify_temperature"));
    }

    #[test]
    fn zero_timeout_fails() {
        let mut config = AssistConfig::default();
        config.gemini.timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "timeout_secs"));
    }

    #[test]
    fn base_url_without_scheme_fails() {
        let mut config = AssistConfig::default();
        config.gemini.base_url = "generativelanguage.googleapis.com".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "http:// or https://"));
    }

    #[test]
    fn unknown_log_level_fails() {
        let mut config = AssistConfig::default();
        config.agent.log_level = "loud".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "agent.log_level"));
    }

    #[test]
    fn collects_every_error() {
        let mut config = AssistConfig::default();
        config.gemini.model = " ".into();
        config.gemini.timeout_secs = 0;
        config.knowledge.faq_file = Some(String::new());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn boundary_threshold_values_pass() {
        let mut config = AssistConfig::default();
        config.intent.threshold = 0.0;
        assert!(validate_config(&config).is_ok());
        config.intent.threshold = 1.0;
        assert!(validate_config(&config).is_ok());
    }
}
