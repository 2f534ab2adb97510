//! # vibe-relay
//!
//! Streaming bridge between a chat client and a local OpenAI-compatible
//! inference server.
//!
//! `POST /api/chat` takes a conversation and an optional system prompt,
//! forwards it upstream with streaming enabled, and re-emits the upstream's
//! SSE deltas as an unframed `text/plain` body that a client can append to a
//! message as it arrives.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod reframe;
pub mod server;
pub mod state;
pub mod streaming;
pub mod upstream;

pub use config::RelayConfig;
pub use error::RelayError;
pub use reframe::Reframer;
pub use server::{create_router, run_server};
pub use state::AppState;
pub use upstream::UpstreamClient;

/// Install the tracing subscriber used by the relay binary.
///
/// `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
