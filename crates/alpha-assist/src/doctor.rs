// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `alpha-assist doctor` command implementation.
//!
//! Runs diagnostic checks against the local setup to find configuration
//! problems before a chat session hits them. No request is sent to the
//! Gemini API, so the checks spend no quota.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use alpha_config::AssistConfig;
use alpha_core::{HealthStatus, RemoteAdapter};
use alpha_gemini::GeminiProvider;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `alpha-assist doctor` command.
///
/// With `plain`, disables colored output.
pub async fn run_doctor(config_path: Option<&Path>, plain: bool) {
    let use_color = !plain && std::io::stdout().is_terminal();
    let results = collect_checks(config_path).await;

    println!();
    println!("  alpha-assist doctor");
    println!("  {}", "-".repeat(50));

    let mut issues = 0;
    for result in &results {
        if result.status != CheckStatus::Pass {
            issues += 1;
        }
        println!("{}", format_check(result, use_color));
    }

    println!();
    if issues > 0 {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();
}

/// Runs every check. Later checks fall back to defaults if the config is invalid.
async fn collect_checks(config_path: Option<&Path>) -> Vec<CheckResult> {
    let (config_check, config) = check_config(config_path);
    let config = config.unwrap_or_default();

    vec![
        config_check,
        check_api_key(&config),
        check_knowledge_base(&config),
        check_adapter(&config).await,
    ]
}

fn format_check(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!(
            "    {symbol} {:<20} {message} ({duration_ms}ms)",
            result.name
        )
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}

/// Check configuration loads without errors.
fn check_config(path: Option<&Path>) -> (CheckResult, Option<AssistConfig>) {
    let start = Instant::now();
    let loaded = match path {
        Some(path) => alpha_config::load_and_validate_path(path),
        None => alpha_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => (
            CheckResult::new("Configuration", CheckStatus::Pass, "valid", start),
            Some(config),
        ),
        Err(errors) => {
            let first = errors
                .first()
                .map(|e| format!(": {e}"))
                .unwrap_or_default();
            (
                CheckResult::new(
                    "Configuration",
                    CheckStatus::Fail,
                    format!("{} error(s){first}", errors.len()),
                    start,
                ),
                None,
            )
        }
    }
}

/// Check an API key is available without revealing it.
fn check_api_key(config: &AssistConfig) -> CheckResult {
    let start = Instant::now();
    match alpha_gemini::resolve_api_key(config.gemini.api_key.as_deref()) {
        Ok(_) => CheckResult::new("API key", CheckStatus::Pass, "found", start),
        Err(_) => CheckResult::new(
            "API key",
            CheckStatus::Fail,
            "not set (gemini.api_key or GEMINI_API_KEY)",
            start,
        ),
    }
}

fn check_knowledge_base(config: &AssistConfig) -> CheckResult {
    let start = Instant::now();
    match crate::load_knowledge(config) {
        Ok(kb) => {
            let source = config.knowledge.faq_file.as_deref().unwrap_or("built-in");
            CheckResult::new(
                "Knowledge base",
                CheckStatus::Pass,
                format!(
                    "{} entries in {} categories ({source})",
                    kb.len(),
                    kb.categories().len()
                ),
                start,
            )
        }
        Err(e) => CheckResult::new("Knowledge base", CheckStatus::Fail, e.to_string(), start),
    }
}

/// Check the Gemini adapter can build its client.
async fn check_adapter(config: &AssistConfig) -> CheckResult {
    let start = Instant::now();
    let knowledge = crate::load_knowledge(config).unwrap_or_default();
    let provider = GeminiProvider::new(config, &knowledge);
    let name = format!("Adapter ({})", provider.name());

    match provider.health_check().await {
        Ok(HealthStatus::Healthy) => CheckResult::new(
            &name,
            CheckStatus::Pass,
            format!("ready, model {}", provider.model()),
            start,
        ),
        Ok(HealthStatus::Degraded(reason)) => {
            CheckResult::new(&name, CheckStatus::Warn, reason, start)
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            CheckResult::new(&name, CheckStatus::Fail, reason, start)
        }
        Err(e) => CheckResult::new(&name, CheckStatus::Fail, e.to_string(), start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_format_uses_tags() {
        let result = CheckResult {
            name: "API key".into(),
            status: CheckStatus::Warn,
            message: "not set".into(),
            duration: Duration::from_millis(3),
        };
        let line = format_check(&result, false);
        assert!(line.contains("[WARN] API key"), "got: {line}");
        assert!(line.ends_with("not set (3ms)"), "got: {line}");
    }

    #[test]
    fn api_key_from_config_passes() {
        let mut config = AssistConfig::default();
        config.gemini.api_key = Some("AIza-test".into());
        assert_eq!(check_api_key(&config).status, CheckStatus::Pass);
    }

    #[test]
    fn missing_faq_file_fails_knowledge_check() {
        let mut config = AssistConfig::default();
        config.knowledge.faq_file = Some("/nonexistent/faq.toml".into());
        assert_eq!(check_knowledge_base(&config).status, CheckStatus::Fail);
    }

    #[test]
    fn builtin_knowledge_check_passes() {
        let result = check_knowledge_base(&AssistConfig::default());
        assert_eq!(result.status, CheckStatus::Pass);
        assert!(result.message.contains("11 entries in 4 categories (built-in)"));
    }

    #[test]
    fn invalid_config_file_fails_config_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha-assist.toml");
        std::fs::write(&path, "[intent]\nthreshold = 3.0\n").unwrap();

        let (result, config) = check_config(Some(path.as_path()));
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(config.is_none());
    }

    #[tokio::test]
    async fn adapter_with_configured_key_is_healthy() {
        let mut config = AssistConfig::default();
        config.gemini.api_key = Some("AIza-test".into());
        let result = check_adapter(&config).await;
        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.name, "Adapter (gemini)");
    }
}
