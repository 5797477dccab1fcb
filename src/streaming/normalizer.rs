use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Result, StreamError};
use crate::models::chunk::{
    GenericStreamingChunk, REASONING_CONTENT_KEY, ToolCallChunk, ToolCallFunctionChunk, UsageBlock,
};
use crate::models::provider::{ProviderChunk, ProviderDelta, ProviderUsage};

/// Tool calls are only ever emitted as functions
const TOOL_CALL_TYPE: &str = "function";

/// Normalize one decoded provider payload into a [`GenericStreamingChunk`]
///
/// An embedded `error` object wins over everything else in the payload and
/// is returned as [`StreamError::UpstreamError`]. Anything that is not a JSON
/// object, or does not fit the chunk shape, is a [`StreamError::DecodeError`].
pub fn normalize(payload: &Value) -> Result<GenericStreamingChunk> {
    let object = payload.as_object().ok_or_else(|| {
        StreamError::DecodeError(format!("expected a JSON object, got: {}", payload))
    })?;

    if let Some(error) = object.get("error").filter(|e| !e.is_null()) {
        tracing::debug!(error = %error, "Provider reported an error in stream payload");
        return Err(StreamError::upstream(error.clone()));
    }

    let chunk = ProviderChunk::deserialize(payload)
        .map_err(|e| StreamError::DecodeError(format!("Unexpected chunk shape: {}", e)))?;
    Ok(chunk_from_provider(&chunk))
}

/// JSON-decode a payload string and [`normalize`] it
pub fn normalize_str(payload: &str) -> Result<GenericStreamingChunk> {
    let value: Value = serde_json::from_str(payload).map_err(|e| {
        StreamError::DecodeError(format!("Failed to decode JSON from chunk: {}", e))
    })?;
    normalize(&value)
}

fn chunk_from_provider(chunk: &ProviderChunk) -> GenericStreamingChunk {
    let mut out = GenericStreamingChunk {
        usage: chunk.usage.as_ref().map(usage_block),
        ..GenericStreamingChunk::empty()
    };

    let Some(choice) = chunk.first_choice() else {
        return out;
    };

    if let Some(delta) = &choice.delta {
        if let Some(content) = &delta.content {
            out.text = content.clone();
        }
        out.provider_specific_fields = provider_specific_fields(delta);
        out.tool_use = tool_use(delta);
    }

    // an empty reason counts as no reason
    if let Some(reason) = choice.finish_reason.as_deref().filter(|r| !r.is_empty()) {
        out.is_finished = true;
        out.finish_reason = reason.to_string();
    }

    out
}

/// Reasoning content takes priority over the generic bag, the two are never merged
fn provider_specific_fields(delta: &ProviderDelta) -> Option<Map<String, Value>> {
    match delta.reasoning_content.as_ref().filter(|r| !r.is_null()) {
        Some(reasoning) => {
            let mut fields = Map::new();
            fields.insert(REASONING_CONTENT_KEY.to_string(), reasoning.clone());
            Some(fields)
        }
        None => delta
            .provider_specific_fields
            .clone()
            .filter(|fields| !fields.is_empty()),
    }
}

/// Only the first fragment is looked at; stubs without arguments are dropped
fn tool_use(delta: &ProviderDelta) -> Option<ToolCallChunk> {
    let call = delta.tool_calls.as_ref()?.first()?;
    let function = call.function.as_ref()?;
    let arguments = function.arguments.as_ref()?;

    Some(ToolCallChunk {
        id: call.id.clone(),
        call_type: TOOL_CALL_TYPE.to_string(),
        function: ToolCallFunctionChunk {
            name: function.name.clone(),
            arguments: arguments.clone(),
        },
        index: call.index.unwrap_or(0),
    })
}

fn usage_block(usage: &ProviderUsage) -> UsageBlock {
    UsageBlock {
        prompt_tokens: usage.prompt_tokens.unwrap_or(0),
        completion_tokens: usage.completion_tokens.unwrap_or(0),
        total_tokens: usage.total_tokens.unwrap_or(0),
    }
}
