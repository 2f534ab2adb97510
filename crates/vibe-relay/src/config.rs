//! Relay configuration.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::RelayError;

/// Upstream base URL when `LOCAL_LLM_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";
/// Model identifier when `LOCAL_LLM_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gpt-oss:20b";
/// Listen address when `VIBE_RELAY_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
/// Upstream idle timeout when `LOCAL_LLM_IDLE_TIMEOUT_SECS` is unset.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Configuration for the relay, resolved once at startup.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Base URL of the OpenAI-compatible server, e.g. `http://localhost:11434/v1`.
    pub base_url: String,

    /// Model identifier sent with every upstream request.
    pub model: String,

    /// Longest wait for the next upstream chunk before the relay gives up on the stream.
    pub idle_timeout: Duration,

    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

impl RelayConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, RelayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unset or blank variables fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RelayError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("LOCAL_LLM_BASE_URL") {
            config.base_url = url;
        }
        if let Some(model) = get("LOCAL_LLM_MODEL") {
            config.model = model;
        }
        if let Some(secs) = get("LOCAL_LLM_IDLE_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                RelayError::Config(format!("LOCAL_LLM_IDLE_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            config.idle_timeout = Duration::from_secs(secs);
        }
        let addr = get("VIBE_RELAY_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        config.bind_addr = addr.trim().parse().map_err(|_| {
            RelayError::Config(format!("VIBE_RELAY_ADDR is not a socket address: {addr}"))
        })?;

        Ok(config)
    }

    /// Set the upstream base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the upstream idle timeout.
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Set the listen address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Full URL of the upstream chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
