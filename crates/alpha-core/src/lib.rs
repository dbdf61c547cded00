// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Alpha-Assist.
//!
//! This crate provides the conversation data model, the static knowledge
//! base the remote classifier is primed with, the shared error type, and
//! the adapter traits implemented by remote classifier and web search
//! backends.

pub mod error;
pub mod knowledge;
pub mod links;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::AlphaError;
pub use knowledge::{DEFAULT_INTENT_THRESHOLD, FaqItem, IntentCategory, KnowledgeBase};
pub use links::dedup_links;
pub use types::{
    ClassificationResult, HealthStatus, Message, MessageId, Role, SearchAnswer, SearchLink,
};

pub use traits::{IntentClassifier, RemoteAdapter, WebSearch};

/// Intent label stamped on bot messages produced by a failed remote call.
pub const ERROR_INTENT: &str = "Error";

/// Intent label stamped on bot messages produced by the web search fallback.
pub const EXTERNAL_SEARCH_INTENT: &str = "External Search";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_error_has_all_variants() {
        let _config = AlphaError::Config("test".into());
        let _provider = AlphaError::Provider {
            message: "test".into(),
            source: None,
        };
        let _malformed = AlphaError::MalformedResponse {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _timeout = AlphaError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _cancelled = AlphaError::Cancelled;
        let _internal = AlphaError::Internal("test".into());
    }

    #[test]
    fn only_config_variant_is_config() {
        assert!(AlphaError::Config("missing key".into()).is_config());
        assert!(!AlphaError::Cancelled.is_config());
        assert!(
            !AlphaError::Provider {
                message: "boom".into(),
                source: None
            }
            .is_config()
        );
    }

    #[test]
    fn error_display_includes_context() {
        let err = AlphaError::Timeout {
            duration: std::time::Duration::from_secs(5),
        };
        assert_eq!(err.to_string(), "operation timed out after 5s");

        let err = AlphaError::Config("API key not found".into());
        assert_eq!(err.to_string(), "configuration error: API key not found");
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_remote_adapter<T: RemoteAdapter>() {}
        fn _assert_classifier<T: IntentClassifier>() {}
        fn _assert_search<T: WebSearch>() {}
    }
}
