// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote intent classifier trait.

use async_trait::async_trait;

use crate::error::AlphaError;
use crate::traits::adapter::RemoteAdapter;
use crate::types::ClassificationResult;

/// Classifies a user query against the knowledge base the adapter was primed with.
///
/// The knowledge base and instruction set are fixed at construction time;
/// only the query varies per call.
#[async_trait]
pub trait IntentClassifier: RemoteAdapter {
    async fn classify(&self, query: &str) -> Result<ClassificationResult, AlphaError>;
}
