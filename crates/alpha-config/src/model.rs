// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Alpha-Assist.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of being silently ignored.

use alpha_core::DEFAULT_INTENT_THRESHOLD;
use serde::{Deserialize, Serialize};

/// Top-level Alpha-Assist configuration.
///
/// Every section is optional and falls back to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AssistConfig {
    /// Assistant identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Gemini API settings shared by the classifier and the search fallback.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Intent acceptance settings.
    #[serde(default)]
    pub intent: IntentConfig,

    /// Web search fallback settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Knowledge base source.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

/// Assistant identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Greeting seeded into every new conversation. Empty disables it.
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            welcome_message: default_welcome_message(),
        }
    }
}

fn default_agent_name() -> String {
    "Alpha-Assist".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_welcome_message() -> String {
    "Hello! I am Alpha-Assist. How can I help you with Enrollment, Payment, or Tech Support today?"
        .to_string()
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key. `None` falls back to `GEMINI_API_KEY` / `API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for both classification and search.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the Generative Language REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature for classification requests.
    #[serde(default = "default_classify_temperature")]
    pub classify_temperature: f32,

    /// Deadline for a single remote call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            classify_temperature: default_classify_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_classify_temperature() -> f32 {
    0.1
}

fn default_timeout_secs() -> u64 {
    30
}

/// Intent acceptance configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IntentConfig {
    /// Confidence below which an answer is treated as out-of-scope.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

fn default_threshold() -> f64 {
    DEFAULT_INTENT_THRESHOLD
}

/// Web search fallback configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Append a visible error message when a search fails instead of dropping it.
    #[serde(default = "default_surface_errors")]
    pub surface_errors: bool,

    /// System instruction sent with search requests.
    #[serde(default = "default_search_instruction")]
    pub instruction: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            surface_errors: default_surface_errors(),
            instruction: default_search_instruction(),
        }
    }
}

fn default_surface_errors() -> bool {
    true
}

fn default_search_instruction() -> String {
    "You are a helpful assistant. Summarize the search results to answer the user's query politely."
        .to_string()
}

/// Knowledge base configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeConfig {
    /// TOML file of `[[faq]]` entries replacing the built-in knowledge base.
    #[serde(default)]
    pub faq_file: Option<String>,
}
