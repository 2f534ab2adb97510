//! # vibe-client
//!
//! Client side of vibe-chat: sends the conversation to the relay and folds
//! the streamed reply into the transcript one chunk at a time.
//!
//! ```no_run
//! # async fn demo() -> vibe_client::Result<()> {
//! use vibe_client::{ChatSession, RelayClient};
//!
//! let session = ChatSession::new(RelayClient::new("http://127.0.0.1:3000")?);
//! let mut updates = session.subscribe();
//! tokio::spawn(async move {
//!     while updates.changed().await.is_ok() {
//!         let snapshot = updates.borrow_and_update().clone();
//!         println!("{} messages", snapshot.len());
//!     }
//! });
//! session.send("Explain lifetimes in one paragraph").await;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod presets;
pub mod session;

pub use client::RelayClient;
pub use error::{ClientError, Result};
pub use presets::{Preset, PRESETS};
pub use session::{ChatSession, Message, SendOutcome, FALLBACK_REPLY};
