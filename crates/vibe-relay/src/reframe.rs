//! Re-framing of an upstream SSE byte stream into plain text deltas.
//!
//! The upstream sends lines of the form `data: {json}` terminated by a
//! `data: [DONE]` line. Chunks arrive with no line alignment, so the
//! [`Reframer`] carries two pieces of state between chunks:
//! - the UTF-8 decoder, for characters split across chunks
//! - the [`LineBuffer`], for lines split across chunks
//!
//! Each step is a pure function of that state plus the new input, so the
//! whole pipeline is testable without a network.

use vibe_protocol::Utf8Decoder;

use crate::models::ChatCompletionChunk;

/// Prefix of every SSE data line.
pub const DATA_PREFIX: &str = "data: ";
/// Payload marking the end of an OpenAI-compatible stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Splits incoming text into complete lines.
///
/// The fragment after the last `\n` is held back until its terminator arrives.
#[derive(Debug, Default)]
pub struct LineBuffer {
    carry: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` and return every line it completes, without terminators.
    pub fn push(&mut self, text: &str) -> Vec<String> {
        self.carry.push_str(text);
        let Some(last_newline) = self.carry.rfind('\n') else {
            return Vec::new();
        };

        let rest = self.carry.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.carry, rest);
        complete
            .strip_suffix('\n')
            .unwrap_or(complete.as_str())
            .split('\n')
            .map(str::to_string)
            .collect()
    }

    /// The incomplete trailing fragment.
    pub fn carry(&self) -> &str {
        &self.carry
    }

    /// Take the incomplete fragment, leaving the buffer empty.
    pub fn take_carry(&mut self) -> String {
        std::mem::take(&mut self.carry)
    }
}

/// What a single complete line means for the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Text to forward to the client.
    Delta(String),
    /// The `[DONE]` sentinel. Produces no output and does not end the stream.
    Done,
    /// Blank, not a data line, malformed JSON, or no content.
    Skip,
}

/// Classify one complete line from the upstream stream.
pub fn classify_line(line: &str) -> Frame {
    let trimmed = line.trim();
    let Some(payload) = trimmed.strip_prefix(DATA_PREFIX) else {
        return Frame::Skip;
    };
    if payload == DONE_SENTINEL {
        return Frame::Done;
    }

    match serde_json::from_str::<ChatCompletionChunk>(payload) {
        Ok(chunk) => chunk.into_content().map_or(Frame::Skip, Frame::Delta),
        Err(err) => {
            tracing::trace!(error = %err, payload, "discarding unparseable frame");
            Frame::Skip
        }
    }
}

/// Stateful converter from upstream bytes to text deltas.
#[derive(Debug, Default)]
pub struct Reframer {
    decoder: Utf8Decoder,
    lines: LineBuffer,
}

impl Reframer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one upstream chunk, returning the deltas it completes, in order.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        let text = self.decoder.decode(bytes);
        self.lines
            .push(&text)
            .iter()
            .filter_map(|line| match classify_line(line) {
                Frame::Delta(content) => Some(content),
                Frame::Done => {
                    tracing::debug!("upstream sent [DONE]");
                    None
                }
                Frame::Skip => None,
            })
            .collect()
    }

    /// Finish the stream, returning any unterminated trailing fragment.
    ///
    /// The fragment is never parsed: only newline-terminated lines are frames.
    pub fn finish(&mut self) -> String {
        let mut rest = self.lines.take_carry();
        rest.push_str(&self.decoder.finish());
        rest
    }
}
