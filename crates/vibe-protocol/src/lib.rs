//! # vibe-protocol
//!
//! The narrow waist between the vibe-chat relay and its clients. Both sides
//! agree on the request body sent to `POST /api/chat`, the JSON error
//! envelope returned on failure, and how raw streamed bytes become text.
//!
//! ## Design Notes
//!
//! ### Streaming text
//! The relay response body is unframed UTF-8. Chunk boundaries are arbitrary,
//! so a character may be split across two reads. [`Utf8Decoder`] carries the
//! incomplete tail forward instead of decoding each chunk in isolation.

pub mod chat;
pub mod decode;

pub use chat::{ChatMessage, ChatRequest, ErrorBody, Role};
pub use decode::Utf8Decoder;

/// Persona prompt used when a request carries no system prompt.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful, high-vibe coding assistant.
You are running locally on the user's machine.
Always be concise, friendly, and use emojis where appropriate.";

/// Path of the relay's chat endpoint.
pub const CHAT_PATH: &str = "/api/chat";
