// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock web search for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use alpha_core::{AlphaError, HealthStatus, RemoteAdapter, SearchAnswer, WebSearch};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::gate::CallGate;

/// A web search that replays queued answers.
///
/// When the queue is empty, a "mock search summary" answer with no links is
/// returned.
pub struct MockSearch {
    responses: Mutex<VecDeque<Result<SearchAnswer, AlphaError>>>,
    queries: Mutex<Vec<String>>,
    gate: Option<Arc<CallGate>>,
}

impl MockSearch {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn with_responses(responses: Vec<Result<SearchAnswer, AlphaError>>) -> Self {
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

    pub async fn push(&self, response: Result<SearchAnswer, AlphaError>) {
        self.responses.lock().await.push_back(response);
    }

    pub async fn queries(&self) -> Vec<String> {
        self.queries.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.queries.lock().await.len()
    }
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteAdapter for MockSearch {
    fn name(&self) -> &str {
        "mock-search"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, AlphaError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl WebSearch for MockSearch {
    async fn search(&self, query: &str) -> Result<SearchAnswer, AlphaError> {
        self.queries.lock().await.push(query.to_string());
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        self.responses.lock().await.pop_front().unwrap_or_else(|| {
            Ok(SearchAnswer {
                summary: "mock search summary".to_string(),
                links: Vec::new(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_answer_when_queue_empty() {
        let search = MockSearch::new();
        let answer = search.search("weather").await.unwrap();
        assert_eq!(answer.summary, "mock search summary");
        assert!(answer.links.is_empty());
        assert_eq!(search.call_count().await, 1);
    }
}
