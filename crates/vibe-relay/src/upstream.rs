//! Client for the upstream OpenAI-compatible inference server.

use std::time::Duration;

use reqwest::{Client, Response};
use vibe_protocol::ChatRequest;

use crate::{config::RelayConfig, error::RelayError, models::UpstreamRequest};

/// Issues streaming chat completion requests to the configured upstream.
pub struct UpstreamClient {
    http: Client,
    completions_url: String,
    model: String,
}

impl UpstreamClient {
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        // No overall request timeout: the body streams for as long as the model generates.
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            completions_url: config.completions_url(),
            model: config.model.clone(),
        })
    }

    /// Send the chat request upstream and return the response once its status is known.
    ///
    /// A non-success status is logged together with the upstream's error body
    /// and reported as [`RelayError::UpstreamStatus`]. Single attempt, no retry.
    pub async fn open_stream(&self, req: &ChatRequest) -> Result<Response, RelayError> {
        let payload = UpstreamRequest::from_chat(&self.model, req);
        tracing::debug!(
            url = %self.completions_url,
            model = %self.model,
            messages = payload.messages.len(),
            "forwarding chat request"
        );

        let response = self
            .http
            .post(&self.completions_url)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            tracing::error!(status = status.as_u16(), body = %body, "LLM API error");
            return Err(RelayError::UpstreamStatus(status));
        }

        Ok(response)
    }
}
