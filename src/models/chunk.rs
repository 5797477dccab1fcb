use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provider-agnostic streaming chunk handed to downstream consumers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericStreamingChunk {
    pub text: String,

    pub tool_use: Option<ToolCallChunk>,

    pub is_finished: bool,

    /// Non-empty exactly when `is_finished`
    pub finish_reason: String,

    pub usage: Option<UsageBlock>,

    /// Always 0, multi-choice streams are not fanned out
    pub index: u32,

    pub provider_specific_fields: Option<Map<String, Value>>,
}

impl GenericStreamingChunk {
    /// The chunk produced for keep-alive frames and degraded payloads
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// Reasoning text, if the provider streamed any in this chunk
    pub fn reasoning_content(&self) -> Option<&Value> {
        self.provider_specific_fields
            .as_ref()
            .and_then(|fields| fields.get(REASONING_CONTENT_KEY))
    }
}

/// Key under which reasoning deltas are exposed in `provider_specific_fields`
pub const REASONING_CONTENT_KEY: &str = "reasoning_content";

/// A single tool-call fragment, copied from upstream without accumulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallChunk {
    pub id: Option<String>,

    /// Always "function"
    #[serde(rename = "type")]
    pub call_type: String,

    pub function: ToolCallFunctionChunk,

    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallFunctionChunk {
    pub name: Option<String>,
    pub arguments: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageBlock {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
