//! Chat completion request sent upstream.

use serde::Serialize;
use vibe_protocol::{ChatMessage, ChatRequest, DEFAULT_SYSTEM_PROMPT};

/// Chat completion request for the upstream server. Always streams.
#[derive(Debug, Serialize)]
pub struct UpstreamRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

impl UpstreamRequest {
    /// Build the upstream payload for a client request.
    ///
    /// A system message is always placed first: the client's prompt when it
    /// sent a non-empty one, otherwise [`DEFAULT_SYSTEM_PROMPT`].
    pub fn from_chat(model: &str, req: &ChatRequest) -> Self {
        let system = req.custom_system_prompt().unwrap_or(DEFAULT_SYSTEM_PROMPT);

        let mut messages = Vec::with_capacity(req.messages.len() + 1);
        messages.push(ChatMessage::system(system));
        messages.extend(req.messages.iter().cloned());

        Self {
            model: model.to_string(),
            messages,
            stream: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibe_protocol::Role;

    fn history() -> Vec<ChatMessage> {
        vec![
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello!"),
            ChatMessage::user("write a haiku"),
        ]
    }

    #[test]
    fn prepends_custom_system_prompt() {
        let req = ChatRequest {
            messages: history(),
            system_prompt: Some("Talk like a pirate".into()),
        };
        let upstream = UpstreamRequest::from_chat("gpt-oss:20b", &req);

        assert_eq!(upstream.model, "gpt-oss:20b");
        assert!(upstream.stream);
        assert_eq!(upstream.messages.len(), 4);
        assert_eq!(upstream.messages[0], ChatMessage::system("Talk like a pirate"));
        assert_eq!(&upstream.messages[1..], history().as_slice());
    }

    #[test]
    fn falls_back_to_default_prompt() {
        for system_prompt in [None, Some(String::new())] {
            let req = ChatRequest {
                messages: history(),
                system_prompt,
            };
            let upstream = UpstreamRequest::from_chat("m", &req);
            assert_eq!(upstream.messages[0].role, Role::System);
            assert_eq!(upstream.messages[0].content, DEFAULT_SYSTEM_PROMPT);
        }
    }

    #[test]
    fn serializes_stream_flag() {
        let upstream = UpstreamRequest::from_chat("m", &ChatRequest::default());
        let value = serde_json::to_value(&upstream).unwrap();
        assert_eq!(value["stream"], true);
        assert_eq!(value["messages"][0]["role"], "system");
    }
}
