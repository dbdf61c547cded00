// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation data model shared by the state machine, adapters, and presentation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{ERROR_INTENT, EXTERNAL_SEARCH_INTENT};

/// Unique identifier for a message in the conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl MessageId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Author of a message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
    System,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// A (title, url) grounding reference attached to a search answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLink {
    pub title: String,
    pub url: String,
}

impl SearchLink {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Structured output of the remote intent classifier.
///
/// `intent`, `confidence` and `reasoning` are required; a payload missing any
/// of them fails to deserialize and takes the classification failure path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub intent: String,
    pub confidence: f64,
    #[serde(default)]
    pub answer: Option<String>,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_search_query: Option<String>,
}

impl ClassificationResult {
    /// Returns true when the confidence falls below the acceptance threshold.
    pub fn is_out_of_scope(&self, threshold: f64) -> bool {
        self.confidence < threshold
    }

    /// The answer text, treating an empty or whitespace-only string as absent.
    pub fn answer_text(&self) -> Option<&str> {
        self.answer.as_deref().filter(|a| !a.trim().is_empty())
    }
}

/// Summary text plus deduplicated sources returned by the web search fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchAnswer {
    pub summary: String,
    pub links: Vec<SearchLink>,
}

/// A single entry in the conversation log.
///
/// Messages are immutable once appended. A bot message either still offers a
/// search (`suggested_search_query`) or carries search results, never both;
/// the constructors below are the only way the state machine builds them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, rename = "isOOS", skip_serializing_if = "Option::is_none")]
    pub is_oos: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_search_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_results: Option<Vec<SearchLink>>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    fn base(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content: content.into(),
            intent: None,
            confidence: None,
            is_oos: None,
            suggested_search_query: None,
            search_results: None,
            created_at: Utc::now(),
        }
    }

    /// A message typed by the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self::base(Role::User, content)
    }

    /// An informational message that carries no classification.
    pub fn system(content: impl Into<String>) -> Self {
        Self::base(Role::System, content)
    }

    /// A bot message labelled with an intent and confidence.
    pub fn bot(content: impl Into<String>, intent: impl Into<String>, confidence: f64) -> Self {
        let mut msg = Self::base(Role::Bot, content);
        msg.intent = Some(intent.into());
        msg.confidence = Some(confidence);
        msg
    }

    /// A classified bot answer that matched the knowledge base.
    pub fn in_scope(content: impl Into<String>, intent: impl Into<String>, confidence: f64) -> Self {
        let mut msg = Self::bot(content, intent, confidence);
        msg.is_oos = Some(false);
        msg
    }

    /// A classified bot reply that fell below the threshold and offers a web search.
    pub fn out_of_scope(
        content: impl Into<String>,
        intent: impl Into<String>,
        confidence: f64,
        suggested_search_query: impl Into<String>,
    ) -> Self {
        let mut msg = Self::bot(content, intent, confidence);
        msg.is_oos = Some(true);
        msg.suggested_search_query = Some(suggested_search_query.into());
        msg
    }

    /// A bot reply standing in for a failed remote call.
    pub fn error(content: impl Into<String>) -> Self {
        Self::bot(content, ERROR_INTENT, 0.0)
    }

    /// A bot reply carrying a web search summary and its sources.
    pub fn search_result(answer: SearchAnswer) -> Self {
        let mut msg = Self::bot(answer.summary, EXTERNAL_SEARCH_INTENT, 1.0);
        msg.search_results = Some(answer.links);
        msg
    }

    /// Returns true if this message still offers the web search fallback.
    pub fn offers_search(&self) -> bool {
        self.is_oos == Some(true)
            && self.suggested_search_query.is_some()
            && self.search_results.is_none()
    }

    pub fn is_error(&self) -> bool {
        self.role == Role::Bot && self.intent.as_deref() == Some(ERROR_INTENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_display_round_trips() {
        for role in [Role::User, Role::Bot, Role::System] {
            let parsed = Role::from_str(&role.to_string()).expect("should parse back");
            assert_eq!(role, parsed);
        }
        assert_eq!(Role::Bot.to_string(), "bot");
    }

    #[test]
    fn message_ids_are_unique() {
        let a = Message::user("hello");
        let b = Message::user("hello");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn out_of_scope_offers_search() {
        let msg = Message::out_of_scope("not sure", "Unknown/OOS", 0.3, "weather today");
        assert!(msg.offers_search());
        assert_eq!(msg.is_oos, Some(true));
        assert!(msg.search_results.is_none());
    }

    #[test]
    fn search_result_never_offers_search() {
        let msg = Message::search_result(SearchAnswer {
            summary: "It is sunny.".into(),
            links: vec![SearchLink::new("Weather", "https://example.com")],
        });
        assert!(!msg.offers_search());
        assert!(msg.suggested_search_query.is_none());
        assert_eq!(msg.intent.as_deref(), Some("External Search"));
        assert_eq!(msg.confidence, Some(1.0));
    }

    #[test]
    fn error_message_has_zero_confidence() {
        let msg = Message::error("boom");
        assert!(msg.is_error());
        assert_eq!(msg.confidence, Some(0.0));
        assert!(msg.is_oos.is_none());
    }

    #[test]
    fn classification_parses_camel_case_payload() {
        let json = r#"{
            "intent": "Payment",
            "confidence": 0.92,
            "answer": "We accept Visa.",
            "reasoning": "matched payment FAQ"
        }"#;
        let result: ClassificationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.intent, "Payment");
        assert_eq!(result.answer_text(), Some("We accept Visa."));
        assert!(result.suggested_search_query.is_none());
        assert!(!result.is_out_of_scope(0.65));
    }

    #[test]
    fn classification_accepts_null_answer_and_suggestion() {
        let json = r#"{
            "intent": "Unknown/OOS",
            "confidence": 0.2,
            "answer": null,
            "reasoning": "no match",
            "suggestedSearchQuery": "capital of france"
        }"#;
        let result: ClassificationResult = serde_json::from_str(json).unwrap();
        assert!(result.answer_text().is_none());
        assert_eq!(
            result.suggested_search_query.as_deref(),
            Some("capital of france")
        );
        assert!(result.is_out_of_scope(0.65));
    }

    #[test]
    fn classification_rejects_missing_confidence() {
        let json = r#"{"intent": "Payment", "reasoning": "x"}"#;
        assert!(serde_json::from_str::<ClassificationResult>(json).is_err());
    }

    #[test]
    fn empty_answer_is_treated_as_absent() {
        let result = ClassificationResult {
            intent: "Payment".into(),
            confidence: 0.9,
            answer: Some("   ".into()),
            reasoning: String::new(),
            suggested_search_query: None,
        };
        assert!(result.answer_text().is_none());
    }

    #[test]
    fn message_serializes_with_wire_names() {
        let msg = Message::out_of_scope("not sure", "Unknown/OOS", 0.4, "query");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "bot");
        assert_eq!(value["isOOS"], true);
        assert_eq!(value["suggestedSearchQuery"], "query");
        assert!(value.get("searchResults").is_none());
    }
}
