pub mod chunk;
pub mod provider;

pub use chunk::{
    GenericStreamingChunk, REASONING_CONTENT_KEY, ToolCallChunk, ToolCallFunctionChunk, UsageBlock,
};
pub use provider::{
    ProviderChoice, ProviderChunk, ProviderDelta, ProviderFunction, ProviderToolCall,
    ProviderUsage,
};
