//! OpenAI-compatible upstream request/response types.

pub mod chat;
pub mod streaming;

pub use chat::UpstreamRequest;
pub use streaming::{ChatCompletionChunk, ChunkChoice, ChunkDelta};
