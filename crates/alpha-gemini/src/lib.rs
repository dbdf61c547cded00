// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini adapters for Alpha-Assist.
//!
//! [`GeminiProvider`] implements both [`IntentClassifier`] (structured JSON
//! output scored against the knowledge base) and [`WebSearch`] (Google Search
//! grounding with deduplicated source links).

pub mod client;
pub mod types;

use std::time::Duration;

use alpha_config::AssistConfig;
use alpha_core::links::{dedup_links, grounded_link};
use alpha_core::{
    AlphaError, ClassificationResult, HealthStatus, IntentClassifier, KnowledgeBase,
    RemoteAdapter, SearchAnswer, WebSearch,
};
use async_trait::async_trait;
use serde_json::json;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, GenerationConfig, Tool};

/// Summary used when a search response carries no text.
pub const EMPTY_SEARCH_SUMMARY: &str = "I couldn't find any results.";

/// Environment variables consulted for the API key, in order.
const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Gemini-backed intent classifier and web search.
///
/// The HTTP client is built on first use. A missing API key is not cached,
/// so every call fails with [`AlphaError::Config`] until one is provided.
pub struct GeminiProvider {
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
    classify_temperature: f32,
    system_instruction: String,
    search_instruction: String,
    client: OnceCell<GeminiClient>,
}

impl GeminiProvider {
    /// Creates a provider primed with `knowledge` and the configured threshold.
    pub fn new(config: &AssistConfig, knowledge: &KnowledgeBase) -> Self {
        info!(
            model = config.gemini.model,
            faq_entries = knowledge.len(),
            "Gemini provider configured"
        );

        Self {
            api_key: config.gemini.api_key.clone(),
            model: config.gemini.model.clone(),
            base_url: config.gemini.base_url.clone(),
            timeout: Duration::from_secs(config.gemini.timeout_secs),
            classify_temperature: config.gemini.classify_temperature,
            system_instruction: knowledge.system_instruction(config.intent.threshold),
            search_instruction: config.search.instruction.clone(),
            client: OnceCell::new(),
        }
    }

    /// Returns the model identifier used for both call sites.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn client(&self) -> Result<&GeminiClient, AlphaError> {
        self.client
            .get_or_try_init(|| async move {
                let api_key = resolve_api_key(self.api_key.as_deref())?;
                debug!("initializing Gemini HTTP client");
                GeminiClient::new(&api_key, &self.base_url, self.timeout)
            })
            .await
    }

    fn classify_request(&self, query: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user(query)],
            system_instruction: Some(Content::instruction(&self.system_instruction)),
            generation_config: Some(GenerationConfig {
                temperature: Some(self.classify_temperature),
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(classification_schema()),
            }),
            tools: None,
        }
    }

    fn search_request(&self, query: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user(query)],
            system_instruction: Some(Content::instruction(&self.search_instruction)),
            generation_config: None,
            tools: Some(vec![Tool::google_search()]),
        }
    }
}

/// Response schema the classifier must follow.
fn classification_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "intent": {
                "type": "STRING",
                "description": "The classified intent category."
            },
            "confidence": {
                "type": "NUMBER",
                "description": "Confidence score between 0.0 and 1.0."
            },
            "answer": {
                "type": "STRING",
                "description": "The matched FAQ answer, or null if out of scope.",
                "nullable": true
            },
            "reasoning": {
                "type": "STRING",
                "description": "Brief explanation of why this intent was chosen."
            },
            "suggestedSearchQuery": {
                "type": "STRING",
                "description": "An optimized search query if the request is out of scope.",
                "nullable": true
            }
        },
        "required": ["intent", "confidence", "reasoning"]
    })
}

/// Parses the classifier's JSON text, tolerating a Markdown code fence around it.
fn parse_classification(text: &str) -> Result<ClassificationResult, AlphaError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    let mut result: ClassificationResult =
        serde_json::from_str(body.trim()).map_err(|e| AlphaError::MalformedResponse {
            message: format!("classifier output does not match schema: {e}"),
            source: Some(Box::new(e)),
        })?;
    result.confidence = result.confidence.clamp(0.0, 1.0);
    Ok(result)
}

/// Resolves the API key from config or environment.
pub fn resolve_api_key(config_key: Option<&str>) -> Result<String, AlphaError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.to_string());
    }

    API_KEY_ENV_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .ok_or_else(|| {
            AlphaError::Config(
                "Gemini API key not found. Set gemini.api_key in config or the GEMINI_API_KEY environment variable.".into(),
            )
        })
}

#[async_trait]
impl RemoteAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, AlphaError> {
        // Only checks that a client can be built; no request is sent.
        match self.client().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl IntentClassifier for GeminiProvider {
    async fn classify(&self, query: &str) -> Result<ClassificationResult, AlphaError> {
        let client = self.client().await?;
        let response = client
            .generate_content(&self.model, &self.classify_request(query))
            .await?;

        let text = response.text().ok_or_else(|| AlphaError::MalformedResponse {
            message: "no response text from model".into(),
            source: None,
        })?;
        let result = parse_classification(&text)?;

        debug!(
            intent = %result.intent,
            confidence = result.confidence,
            reasoning = %result.reasoning,
            "query classified"
        );
        Ok(result)
    }
}

#[async_trait]
impl WebSearch for GeminiProvider {
    async fn search(&self, query: &str) -> Result<SearchAnswer, AlphaError> {
        let client = self.client().await?;
        let response = client
            .generate_content(&self.model, &self.search_request(query))
            .await?;

        let summary = response
            .text()
            .unwrap_or_else(|| EMPTY_SEARCH_SUMMARY.to_string());
        let links = dedup_links(response.grounding_chunks().iter().filter_map(|chunk| {
            let web = chunk.web.as_ref()?;
            grounded_link(web.title.as_deref(), web.uri.as_deref())
        }));

        debug!(links = links.len(), "web search completed");
        Ok(SearchAnswer { summary, links })
    }
}
