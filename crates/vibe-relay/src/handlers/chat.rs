//! Chat relay handler.

use axum::{body::Bytes, extract::State, response::Response};
use vibe_protocol::ChatRequest;

use crate::{error::RelayError, state::AppState, streaming};

/// Handle `POST /api/chat`.
///
/// The body is parsed by hand rather than with the `Json` extractor so that a
/// malformed request gets the same `{ "error": ... }` envelope as every other
/// failure. The upstream status is checked before any response bytes are sent:
/// an upstream error produces a 500 and no stream is opened.
pub async fn handle_chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, RelayError> {
    let req: ChatRequest =
        serde_json::from_slice(&body).map_err(|e| RelayError::InvalidRequest(e.to_string()))?;

    let upstream = state.upstream.open_stream(&req).await?;
    Ok(streaming::relay_response(
        upstream.bytes_stream(),
        state.config.idle_timeout,
    ))
}
