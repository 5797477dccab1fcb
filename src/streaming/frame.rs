use crate::error::{Result, StreamError};
use crate::models::chunk::GenericStreamingChunk;
use crate::streaming::normalizer::normalize_str;

/// SSE field marker in front of every payload line
pub const DEFAULT_FRAMING_PREFIX: &str = "data:";

/// Literal payload that closes an OpenAI-style stream
pub const DEFAULT_TERMINATOR: &str = "[DONE]";

/// How raw frames are de-framed for one iteration discipline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameOptions {
    pub prefix: String,
    /// `None` means the sentinel is decoded like any other payload
    pub terminator: Option<String>,
}

impl FrameOptions {
    /// Blocking transports signal the end natively, so no sentinel
    pub fn sync() -> Self {
        Self {
            prefix: DEFAULT_FRAMING_PREFIX.to_string(),
            terminator: None,
        }
    }

    /// The async transport never exhausts on its own and sends `[DONE]` instead
    pub fn async_stream() -> Self {
        Self {
            prefix: DEFAULT_FRAMING_PREFIX.to_string(),
            terminator: Some(DEFAULT_TERMINATOR.to_string()),
        }
    }
}

/// Result of handling one raw frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    Chunk(GenericStreamingChunk),
    /// Nothing left after stripping the framing
    KeepAlive,
    /// Terminator sentinel seen
    Terminated,
    /// Payload could not be decoded; the stream carries on
    Degraded { raw: String, reason: String },
}

impl FrameOutcome {
    /// The chunk to yield, or `None` when the sequence ends here
    pub fn into_chunk(self) -> Option<GenericStreamingChunk> {
        match self {
            FrameOutcome::Chunk(chunk) => Some(chunk),
            FrameOutcome::KeepAlive | FrameOutcome::Degraded { .. } => {
                Some(GenericStreamingChunk::empty())
            }
            FrameOutcome::Terminated => None,
        }
    }
}

/// Trim whitespace, drop one leading framing prefix, trim again
pub fn strip_framing<'a>(raw: &'a str, prefix: &str) -> &'a str {
    let trimmed = raw.trim();
    if prefix.is_empty() {
        return trimmed;
    }
    trimmed.strip_prefix(prefix).unwrap_or(trimmed).trim()
}

/// Classify and parse one raw frame
///
/// Only [`StreamError::UpstreamError`] is returned as an error; decode
/// failures become [`FrameOutcome::Degraded`].
pub fn process_frame(raw: &str, options: &FrameOptions) -> Result<FrameOutcome> {
    let payload = strip_framing(raw, &options.prefix);

    if payload.is_empty() {
        return Ok(FrameOutcome::KeepAlive);
    }

    if options.terminator.as_deref() == Some(payload) {
        tracing::debug!("Received stream terminator");
        return Ok(FrameOutcome::Terminated);
    }

    match normalize_str(payload) {
        Ok(chunk) => Ok(FrameOutcome::Chunk(chunk)),
        Err(StreamError::DecodeError(reason)) => {
            tracing::debug!(
                error = %reason,
                chunk = %payload,
                "Error parsing chunk, defaulting to empty chunk"
            );
            Ok(FrameOutcome::Degraded {
                raw: payload.to_string(),
                reason,
            })
        }
        Err(e) => Err(e),
    }
}
