//! Error types for the relay client.

use reqwest::StatusCode;

/// Result type for relay client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the relay.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("relay request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("relay responded with {0}")]
    Status(StatusCode),
}
