//! Chat request and error envelope types.

use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message as it travels over the wire: role and content only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(
        rename = "systemPrompt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub system_prompt: Option<String>,
}

impl ChatRequest {
    /// The system prompt to use, if one was supplied and is not empty.
    pub fn custom_system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref().filter(|p| !p.is_empty())
    }
}

/// JSON body returned by the relay on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_camel_case_system_prompt() {
        let req = ChatRequest {
            messages: vec![ChatMessage::user("hi")],
            system_prompt: Some("be brief".to_string()),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "messages": [{"role": "user", "content": "hi"}],
                "systemPrompt": "be brief"
            })
        );
    }

    #[test]
    fn system_prompt_is_optional() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"messages":[{"role":"assistant","content":"ok"}]}"#)
                .unwrap();
        assert_eq!(req.messages, vec![ChatMessage::assistant("ok")]);
        assert!(req.system_prompt.is_none());
    }

    #[test]
    fn empty_system_prompt_is_not_custom() {
        let req = ChatRequest {
            messages: vec![],
            system_prompt: Some(String::new()),
        };
        assert_eq!(req.custom_system_prompt(), None);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = serde_json::from_str::<ChatMessage>(r#"{"role":"tool","content":""}"#);
        assert!(err.is_err());
    }
}
