// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! Failures are returned as-is; the conversation layer decides what the user
//! sees, so there is no retry loop here.

use std::time::Duration;

use alpha_core::AlphaError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client authenticated with `api_key` against `base_url`.
    ///
    /// `timeout` bounds each request end to end.
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, AlphaError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                AlphaError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| AlphaError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url)
    }

    /// Sends a single `generateContent` request.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AlphaError> {
        let response = self
            .client
            .post(self.endpoint(model))
            .json(request)
            .send()
            .await
            .map_err(|e| AlphaError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model, "generateContent response received");

        let body = response.text().await.map_err(|e| AlphaError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "Gemini API error ({}): {}",
                    api_err.error.status.as_deref().unwrap_or("UNKNOWN"),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(AlphaError::Provider {
                message,
                source: None,
            });
        }

        serde_json::from_str(&body).map_err(|e| AlphaError::MalformedResponse {
            message: format!("failed to parse generateContent response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
