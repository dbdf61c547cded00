// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock intent classifier for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use alpha_core::{AlphaError, ClassificationResult, HealthStatus, IntentClassifier, RemoteAdapter};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::gate::CallGate;

/// Builds an in-scope classification carrying `answer`.
pub fn in_scope(intent: &str, confidence: f64, answer: &str) -> ClassificationResult {
    ClassificationResult {
        intent: intent.to_string(),
        confidence,
        answer: Some(answer.to_string()),
        reasoning: "matched a knowledge base entry".to_string(),
        suggested_search_query: None,
    }
}

/// Builds a classification with no answer and an optional search suggestion.
pub fn out_of_scope(confidence: f64, suggestion: Option<&str>) -> ClassificationResult {
    ClassificationResult {
        intent: "Unknown/OOS".to_string(),
        confidence,
        answer: None,
        reasoning: "no knowledge base entry covers this".to_string(),
        suggested_search_query: suggestion.map(str::to_string),
    }
}

/// A classifier that replays queued results.
///
/// Results are popped from a FIFO queue. When the queue is empty, an
/// in-scope "Greeting" classification is returned.
pub struct MockClassifier {
    responses: Mutex<VecDeque<Result<ClassificationResult, AlphaError>>>,
    queries: Mutex<Vec<String>>,
    gate: Option<Arc<CallGate>>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Create a classifier pre-loaded with the given results.
    pub fn with_responses(responses: Vec<Result<ClassificationResult, AlphaError>>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            ..Self::new()
        }
    }

    /// Park every call on `gate` until the test releases it.
    pub fn gated(mut self, gate: Arc<CallGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub async fn push(&self, response: Result<ClassificationResult, AlphaError>) {
        self.responses.lock().await.push_back(response);
    }

    /// Queries received so far, in call order.
    pub async fn queries(&self) -> Vec<String> {
        self.queries.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.queries.lock().await.len()
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteAdapter for MockClassifier {
    fn name(&self) -> &str {
        "mock-classifier"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, AlphaError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl IntentClassifier for MockClassifier {
    async fn classify(&self, query: &str) -> Result<ClassificationResult, AlphaError> {
        self.queries.lock().await.push(query.to_string());
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(in_scope("Greeting", 0.99, "Hello! How can I help?")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_result_when_queue_empty() {
        let classifier = MockClassifier::new();
        let result = classifier.classify("hi").await.unwrap();
        assert_eq!(result.intent, "Greeting");
        assert_eq!(classifier.queries().await, vec!["hi".to_string()]);
    }

    #[tokio::test]
    async fn queued_results_returned_in_order() {
        let classifier = MockClassifier::with_responses(vec![
            Ok(in_scope("Payment", 0.9, "We accept Visa.")),
            Err(AlphaError::Internal("boom".into())),
        ]);

        assert_eq!(classifier.classify("a").await.unwrap().intent, "Payment");
        assert!(classifier.classify("b").await.is_err());
        assert_eq!(classifier.classify("c").await.unwrap().intent, "Greeting");
        assert_eq!(classifier.call_count().await, 3);
    }
}
