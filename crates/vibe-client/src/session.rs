//! Chat session state and the streaming send loop.
//!
//! A [`ChatSession`] owns the transcript for one conversation. The transcript
//! lives in a `watch` channel: every change publishes a full snapshot, and a
//! front-end re-renders from whatever snapshot is current.

use std::pin::pin;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::StreamExt;
use tokio::sync::watch;
use uuid::Uuid;
use vibe_protocol::{ChatMessage, ChatRequest, Role, DEFAULT_SYSTEM_PROMPT};

use crate::client::RelayClient;

/// Assistant text shown when the relay cannot be reached or fails the request.
pub const FALLBACK_REPLY: &str =
    "Sorry, I encountered an error. Please make sure Ollama is running.";

/// One entry in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Time-ordered unique ID (UUIDv7).
    pub id: String,
    pub role: Role,
    pub content: String,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            role,
            content: content.into(),
        }
    }

    fn to_wire(&self) -> ChatMessage {
        ChatMessage::new(self.role, self.content.clone())
    }
}

/// Result of a call to [`ChatSession::send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty or whitespace. Nothing was sent.
    Blank,
    /// Another send is still streaming. Nothing was sent.
    Busy,
    /// The reply streamed until the relay closed the body or a read failed.
    Completed { chunks: usize },
    /// The relay was unreachable or returned an error; the fallback reply was appended.
    Unreachable,
}

/// Marks a send as in flight until dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// One conversation with the relay.
pub struct ChatSession {
    client: RelayClient,
    system_prompt: String,
    transcript: watch::Sender<Vec<Message>>,
    in_flight: AtomicBool,
}

impl ChatSession {
    pub fn new(client: RelayClient) -> Self {
        let (transcript, _) = watch::channel(Vec::new());
        Self {
            client,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            transcript,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        self.system_prompt = prompt.into();
    }

    /// Subscribe to transcript snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Message>> {
        self.transcript.subscribe()
    }

    /// Copy of the current transcript.
    pub fn messages(&self) -> Vec<Message> {
        self.transcript.borrow().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Drop all messages. Returns `false` if a send is in flight.
    pub fn clear(&self) -> bool {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            return false;
        };
        self.transcript.send_replace(Vec::new());
        true
    }

    /// Send `input` as a user message and stream the assistant's reply into the transcript.
    ///
    /// Never fails: relay errors become a fallback assistant message, and a
    /// read error mid-stream keeps whatever text already arrived.
    pub async fn send(&self, input: &str) -> SendOutcome {
        if input.trim().is_empty() {
            return SendOutcome::Blank;
        }
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            return SendOutcome::Busy;
        };

        self.push(Message::new(Role::User, input));
        let request = ChatRequest {
            messages: self.transcript.borrow().iter().map(Message::to_wire).collect(),
            system_prompt: Some(self.system_prompt.clone()),
        };

        let stream = match self.client.stream_chat(&request).await {
            Ok(stream) => stream,
            Err(err) => {
                tracing::error!(error = %err, "chat request failed");
                self.push(Message::new(Role::Assistant, FALLBACK_REPLY));
                return SendOutcome::Unreachable;
            }
        };

        // Placeholder so the reply is visible before the first token.
        let reply_id = self.push(Message::new(Role::Assistant, ""));
        let mut stream = pin!(stream);
        let mut chunks = 0;
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(text) => {
                    chunks += 1;
                    self.append(&reply_id, &text);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "stream reading error");
                    break;
                }
            }
        }

        tracing::debug!(chunks, "reply complete");
        SendOutcome::Completed { chunks }
    }

    fn push(&self, message: Message) -> String {
        let id = message.id.clone();
        self.transcript.send_modify(|messages| messages.push(message));
        id
    }

    fn append(&self, id: &str, text: &str) {
        self.transcript.send_modify(|messages| {
            if let Some(message) = messages.iter_mut().rev().find(|m| m.id == id) {
                message.content.push_str(text);
            }
        });
    }
}
