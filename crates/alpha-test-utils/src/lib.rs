// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Alpha-Assist integration tests.
//!
//! Provides mock remote adapters and a harness that wires them into a
//! [`alpha_conversation::ConversationState`] for deterministic tests without
//! network access.
//!
//! # Components
//!
//! - [`MockClassifier`] - scripted intent classifier
//! - [`MockSearch`] - scripted web search
//! - [`CallGate`] - holds a mock call open so tests can observe pending lanes
//! - [`TestHarness`] - a conversation wired to both mocks

pub mod gate;
pub mod harness;
pub mod mock_classifier;
pub mod mock_search;

pub use gate::CallGate;
pub use harness::TestHarness;
pub use mock_classifier::{MockClassifier, in_scope, out_of_scope};
pub use mock_search::MockSearch;
