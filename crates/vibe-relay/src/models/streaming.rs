//! Server-Sent Events (SSE) chunk types for upstream chat completions.
//!
//! Every field is optional so that servers which omit `id`, `model` or
//! `finish_reason` still parse. Only `choices[0].delta.content` is used.

use serde::Deserialize;

/// Chat completion chunk from a streaming response.
#[derive(Debug, Default, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

/// Chat choice with delta for streaming.
#[derive(Debug, Default, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub delta: ChunkDelta,
}

/// Delta object containing incremental content.
#[derive(Debug, Default, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionChunk {
    /// Text of the first choice's delta, if present and non-empty.
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta.content)
            .filter(|content| !content.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(raw: &str) -> Option<String> {
        serde_json::from_str::<ChatCompletionChunk>(raw)
            .unwrap()
            .into_content()
    }

    #[test]
    fn full_openai_chunk() {
        let raw = r#"{"id":"chatcmpl-1","object":"chat.completion.chunk","created":1,
            "model":"m","choices":[{"index":0,"delta":{"role":"assistant","content":"Hi"},
            "finish_reason":null}]}"#;
        assert_eq!(content(raw).as_deref(), Some("Hi"));
    }

    #[test]
    fn missing_pieces_yield_nothing() {
        assert_eq!(content(r#"{}"#), None);
        assert_eq!(content(r#"{"choices":[]}"#), None);
        assert_eq!(content(r#"{"choices":[{}]}"#), None);
        assert_eq!(content(r#"{"choices":[{"delta":{"content":null}}]}"#), None);
        assert_eq!(content(r#"{"choices":[{"delta":{"content":""}}]}"#), None);
    }

    #[test]
    fn only_first_choice_counts() {
        let raw = r#"{"choices":[{"delta":{}},{"delta":{"content":"second"}}]}"#;
        assert_eq!(content(raw), None);
    }
}
