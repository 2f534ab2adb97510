//! HTTP client for the relay's streaming chat endpoint.

use std::time::Duration;

use futures::{Stream, StreamExt};
use reqwest::Client;
use vibe_protocol::{ChatRequest, Utf8Decoder, CHAT_PATH};

use crate::error::{ClientError, Result};

/// Sends chat requests to a relay and yields the response as text chunks.
#[derive(Clone)]
pub struct RelayClient {
    http: Client,
    endpoint: String,
}

impl RelayClient {
    /// Create a client for the relay at `relay_url`, e.g. `http://127.0.0.1:3000`.
    pub fn new(relay_url: &str) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            endpoint: format!("{}{}", relay_url.trim_end_matches('/'), CHAT_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `request` and stream back the decoded response body.
    ///
    /// Fails before streaming if the relay cannot be reached or answers with
    /// a non-success status.
    pub async fn stream_chat(
        &self,
        request: &ChatRequest,
    ) -> Result<impl Stream<Item = Result<String>> + Send + 'static> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                body = %body,
                "relay rejected chat request"
            );
            return Err(ClientError::Status(status));
        }

        Ok(decode_text_stream(response.bytes_stream()))
    }
}

/// Decode a byte stream into text chunks, carrying partial characters between reads.
///
/// Reads that complete no character yield nothing. The first read error is
/// yielded and ends the stream.
pub fn decode_text_stream<S, B, E>(
    chunks: S,
) -> impl Stream<Item = Result<String>> + Send + 'static
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<ClientError> + Send + 'static,
{
    async_stream::stream! {
        let mut chunks = Box::pin(chunks);
        let mut decoder = Utf8Decoder::new();

        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(bytes) => {
                    let text = decoder.decode(bytes.as_ref());
                    if !text.is_empty() {
                        yield Ok(text);
                    }
                }
                Err(err) => {
                    yield Err(err.into());
                    return;
                }
            }
        }

        let tail = decoder.finish();
        if !tail.is_empty() {
            yield Ok(tail);
        }
    }
}
