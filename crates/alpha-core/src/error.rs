// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Alpha-Assist.

use thiserror::Error;

/// The primary error type returned by remote adapters and core operations.
///
/// None of these cross the conversation boundary: the state machine turns
/// every variant into a bot message or a logged drop.
#[derive(Debug, Error)]
pub enum AlphaError {
    /// Configuration errors (missing API key, unreadable knowledge base, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Remote model provider errors (transport failure, non-2xx status).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The provider answered but the payload did not match the expected shape.
    #[error("malformed response: {message}")]
    MalformedResponse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Remote call exceeded its deadline.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Remote call was cancelled before it completed.
    #[error("operation cancelled")]
    Cancelled,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AlphaError {
    /// Returns true for errors caused by local configuration rather than the remote side.
    pub fn is_config(&self) -> bool {
        matches!(self, AlphaError::Config(_))
    }
}
