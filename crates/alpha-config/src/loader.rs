// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./alpha-assist.toml` > `~/.config/alpha-assist/alpha-assist.toml`
//! > `/etc/alpha-assist/alpha-assist.toml`, with `ALPHA_*` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::AssistConfig;

/// File name looked up in each configuration directory.
pub const CONFIG_FILE_NAME: &str = "alpha-assist.toml";

/// System-wide configuration path.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/alpha-assist/alpha-assist.toml";

/// Section prefixes recognised in `ALPHA_*` variable names.
const ENV_SECTIONS: &[&str] = &["agent", "gemini", "intent", "search", "knowledge"];

/// Per-user configuration path under the XDG config directory.
pub fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("alpha-assist").join(CONFIG_FILE_NAME))
        .unwrap_or_default()
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/alpha-assist/alpha-assist.toml`
/// 3. `~/.config/alpha-assist/alpha-assist.toml`
/// 4. `./alpha-assist.toml`
/// 5. `ALPHA_*` environment variables
pub fn load_config() -> Result<AssistConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<AssistConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AssistConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AssistConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AssistConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AssistConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(CONFIG_FILE_NAME))
        .merge(env_provider())
}

/// Environment provider mapping `ALPHA_<SECTION>_<KEY>` to `section.key`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `ALPHA_GEMINI_API_KEY` maps to `gemini.api_key`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("ALPHA_").map(|key| map_env_key(key.as_str()).into())
}

/// Figment hands over the raw variable suffix (`GEMINI_API_KEY`), so the
/// key is lowercased before matching sections.
fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("gemini_api_key"), "gemini.api_key");
        assert_eq!(map_env_key("agent_log_level"), "agent.log_level");
        assert_eq!(map_env_key("search_surface_errors"), "search.surface_errors");
        assert_eq!(map_env_key("knowledge_faq_file"), "knowledge.faq_file");
        assert_eq!(map_env_key("intent_threshold"), "intent.threshold");
    }

    #[test]
    fn uppercase_env_keys_map_to_sections() {
        assert_eq!(map_env_key("GEMINI_API_KEY"), "gemini.api_key");
        assert_eq!(map_env_key("GEMINI_MODEL"), "gemini.model");
        assert_eq!(map_env_key("INTENT_THRESHOLD"), "intent.threshold");
        assert_eq!(map_env_key("Search_Surface_Errors"), "search.surface_errors");
    }

    #[test]
    fn api_key_env_var_loads() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ALPHA_GEMINI_API_KEY", "AIza-from-env");
            let config = load_config_from_path(Path::new(CONFIG_FILE_NAME))?;
            assert_eq!(config.gemini.api_key.as_deref(), Some("AIza-from-env"));
            Ok(())
        });
    }

    #[test]
    fn unknown_env_section_is_left_alone() {
        assert_eq!(map_env_key("verbose"), "verbose");
    }

    #[test]
    fn env_overrides_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE_NAME,
                r#"
[gemini]
model = "from-file"
"#,
            )?;
            jail.set_env("ALPHA_GEMINI_MODEL", "from-env");
            jail.set_env("ALPHA_INTENT_THRESHOLD", "0.8");

            let config = load_config_from_path(Path::new(CONFIG_FILE_NAME))?;
            assert_eq!(config.gemini.model, "from-env");
            assert_eq!(config.intent.threshold, 0.8);
            Ok(())
        });
    }
}
