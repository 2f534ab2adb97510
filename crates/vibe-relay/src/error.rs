//! HTTP error handling and response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use vibe_protocol::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to connect to Local LLM: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("LLM API error: {}", .0.canonical_reason().unwrap_or("Unknown Status"))]
    UpstreamStatus(StatusCode),

    #[error("configuration error: {0}")]
    Config(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::Transport(_) | RelayError::UpstreamStatus(_) | RelayError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(status = status.as_u16(), error = %self, "chat request failed");

        let body = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_message_uses_reason_phrase() {
        let err = RelayError::UpstreamStatus(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "LLM API error: Service Unavailable");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_request_is_a_client_error() {
        let err = RelayError::InvalidRequest("missing field `messages`".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
