//! Plain-text streaming of relayed chat completions.
//!
//! The upstream SSE stream is re-framed into raw text:
//! - Each non-empty `delta.content` is written as-is, with no framing
//! - `[DONE]` is swallowed; the body ends when the upstream closes
//! - Read errors and idle timeouts end the body cleanly, keeping what was sent

use std::convert::Infallible;
use std::fmt::Display;
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use futures::{Stream, StreamExt};

use crate::reframe::Reframer;

/// Content type of the relay's success response.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Re-frame an upstream byte stream into a stream of text chunks.
///
/// The returned stream never yields an error: upstream read failures are
/// logged and end the stream.
pub fn relay_stream<S, B, E>(
    upstream: S,
    idle_timeout: Duration,
) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    async_stream::stream! {
        let mut upstream = Box::pin(upstream);
        let mut reframer = Reframer::new();
        let mut deltas = 0usize;
        let mut bytes_out = 0usize;

        loop {
            let next = match tokio::time::timeout(idle_timeout, upstream.next()).await {
                Ok(next) => next,
                Err(_) => {
                    tracing::warn!(
                        idle_secs = idle_timeout.as_secs(),
                        "upstream went idle, closing stream"
                    );
                    break;
                }
            };

            match next {
                Some(Ok(chunk)) => {
                    for delta in reframer.feed(chunk.as_ref()) {
                        deltas += 1;
                        bytes_out += delta.len();
                        yield Ok(Bytes::from(delta));
                    }
                }
                Some(Err(err)) => {
                    tracing::error!(error = %err, "stream error");
                    break;
                }
                None => break,
            }
        }

        let leftover = reframer.finish();
        if !leftover.trim().is_empty() {
            tracing::debug!(leftover = %leftover, "discarding unterminated upstream line");
        }
        tracing::debug!(deltas, bytes_out, "relay stream closed");
    }
}

/// Build the HTTP response that streams re-framed text to the client.
pub fn relay_response<S, B, E>(upstream: S, idle_timeout: Duration) -> Response
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let mut response = Response::new(Body::from_stream(relay_stream(upstream, idle_timeout)));
    *response.status_mut() = StatusCode::OK;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_CONTENT_TYPE));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn frame(content: &str) -> Vec<u8> {
        format!(
            "data: {}\n",
            serde_json::json!({"choices": [{"delta": {"content": content}}]})
        )
        .into_bytes()
    }

    async fn collect<S>(s: S) -> String
    where
        S: Stream<Item = Result<Bytes, Infallible>>,
    {
        let chunks: Vec<_> = s.collect().await;
        let mut out = Vec::new();
        for chunk in chunks {
            out.extend_from_slice(&chunk.unwrap());
        }
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn emits_one_chunk_per_delta() {
        let upstream = stream::iter(vec![
            Ok::<_, String>(frame("Hel")),
            Ok(frame("lo")),
            Ok(b"data: [DONE]\n".to_vec()),
        ]);
        let chunks: Vec<_> = relay_stream(upstream, Duration::from_secs(5))
            .collect()
            .await;
        assert_eq!(chunks.len(), 2);
        assert_eq!(collect(stream::iter(chunks)).await, "Hello");
    }

    #[tokio::test]
    async fn read_error_keeps_partial_output_and_closes() {
        let upstream = stream::iter(vec![
            Ok(frame("partial")),
            Err("connection reset".to_string()),
            Ok(frame("never")),
        ]);
        assert_eq!(
            collect(relay_stream(upstream, Duration::from_secs(5))).await,
            "partial"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn idle_upstream_is_closed_after_timeout() {
        // Upstream sends [DONE] and then never closes.
        let upstream = stream::iter(vec![
            Ok::<_, String>(frame("hi")),
            Ok(b"data: [DONE]\n".to_vec()),
        ])
        .chain(stream::pending());
        assert_eq!(
            collect(relay_stream(upstream, Duration::from_secs(30))).await,
            "hi"
        );
    }

    #[tokio::test]
    async fn response_has_plain_text_headers() {
        let upstream = stream::iter(Vec::<Result<Vec<u8>, String>>::new());
        let response = relay_response(upstream, Duration::from_secs(1));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], TEXT_CONTENT_TYPE);
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
    }
}
