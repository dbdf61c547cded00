// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote web search trait.

use async_trait::async_trait;

use crate::error::AlphaError;
use crate::traits::adapter::RemoteAdapter;
use crate::types::SearchAnswer;

/// Answers a free-text query from the web.
///
/// Implementations return links already deduplicated by url, in the order
/// the backend produced them.
#[async_trait]
pub trait WebSearch: RemoteAdapter {
    async fn search(&self, query: &str) -> Result<SearchAnswer, AlphaError>;
}
