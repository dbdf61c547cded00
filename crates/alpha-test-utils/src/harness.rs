// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness wiring the mock adapters into a conversation.

use std::sync::Arc;

use alpha_config::AssistConfig;
use alpha_conversation::{ConversationOptions, ConversationState};
use alpha_core::{AlphaError, ClassificationResult, SearchAnswer};

use crate::gate::CallGate;
use crate::mock_classifier::MockClassifier;
use crate::mock_search::MockSearch;

/// Builder for creating test conversations with configurable mocks.
pub struct TestHarnessBuilder {
    classifications: Vec<Result<ClassificationResult, AlphaError>>,
    searches: Vec<Result<SearchAnswer, AlphaError>>,
    options: ConversationOptions,
    classifier_gate: Option<Arc<CallGate>>,
    search_gate: Option<Arc<CallGate>>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            classifications: Vec::new(),
            searches: Vec::new(),
            options: ConversationOptions::default(),
            classifier_gate: None,
            search_gate: None,
        }
    }

    /// Set queued classifier results.
    pub fn with_classifications(
        mut self,
        responses: Vec<Result<ClassificationResult, AlphaError>>,
    ) -> Self {
        self.classifications = responses;
        self
    }

    /// Set queued search answers.
    pub fn with_searches(mut self, responses: Vec<Result<SearchAnswer, AlphaError>>) -> Self {
        self.searches = responses;
        self
    }

    pub fn with_options(mut self, options: ConversationOptions) -> Self {
        self.options = options;
        self
    }

    /// Derive conversation options from a loaded config.
    pub fn with_config(mut self, config: &AssistConfig) -> Self {
        self.options = ConversationOptions::from_config(config);
        self
    }

    pub fn with_classifier_gate(mut self, gate: Arc<CallGate>) -> Self {
        self.classifier_gate = Some(gate);
        self
    }

    pub fn with_search_gate(mut self, gate: Arc<CallGate>) -> Self {
        self.search_gate = Some(gate);
        self
    }

    pub fn build(self) -> TestHarness {
        let mut classifier = MockClassifier::with_responses(self.classifications);
        if let Some(gate) = self.classifier_gate {
            classifier = classifier.gated(gate);
        }
        let mut search = MockSearch::with_responses(self.searches);
        if let Some(gate) = self.search_gate {
            search = search.gated(gate);
        }

        let classifier = Arc::new(classifier);
        let search = Arc::new(search);
        let state = Arc::new(ConversationState::new(
            classifier.clone(),
            search.clone(),
            self.options,
        ));

        TestHarness {
            classifier,
            search,
            state,
        }
    }
}

/// A conversation backed by mock adapters.
pub struct TestHarness {
    /// The mock classifier.
    pub classifier: Arc<MockClassifier>,
    /// The mock web search.
    pub search: Arc<MockSearch>,
    /// The conversation under test.
    pub state: Arc<ConversationState>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Contents of every logged message, in order.
    pub fn contents(&self) -> Vec<String> {
        self.state.snapshot().into_iter().map(|m| m.content).collect()
    }
}
