//! Application state shared across handlers.

use std::sync::Arc;

use crate::{config::RelayConfig, error::RelayError, upstream::UpstreamClient};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Client for the upstream inference server.
    pub upstream: Arc<UpstreamClient>,
    /// Relay configuration, resolved once at startup.
    pub config: Arc<RelayConfig>,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let upstream = UpstreamClient::new(&config)?;
        Ok(Self {
            upstream: Arc::new(upstream),
            config: Arc::new(config),
        })
    }
}
