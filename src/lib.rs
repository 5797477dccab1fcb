//! # Databricks Stream
//!
//! Normalizes the server-sent-event stream of an OpenAI-compatible chat
//! completion endpoint (Databricks model serving, OpenRouter and friends) into
//! [`GenericStreamingChunk`]s.
//!
//! ## Overview
//!
//! Each raw frame goes through the same steps on both the blocking and the async path:
//! - strip the `data:` framing and whitespace
//! - empty frames are keep-alives and yield an empty chunk
//! - `[DONE]` ends the async stream
//! - the JSON payload is normalized; an embedded `error` object is fatal
//! - payloads that fail to decode are logged and yield an empty chunk
//!
//! ## Quick Start
//!
//! ```rust
//! use databricks_stream::SyncChunkIterator;
//! use std::convert::Infallible;
//!
//! let frames = vec![
//!     Ok::<_, Infallible>(r#"data: {"choices":[{"delta":{"content":"Hi"}}]}"#.to_string()),
//!     Ok(r#"data: {"choices":[{"delta":{},"finish_reason":"stop"}]}"#.to_string()),
//! ];
//!
//! let chunks: Vec<_> = SyncChunkIterator::new(frames)
//!     .collect::<databricks_stream::Result<_>>()
//!     .unwrap();
//! assert_eq!(chunks[0].text, "Hi");
//! assert!(chunks[1].is_finished);
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Frame options loaded from env or TOML
//! - [`error`] - Error types and handling
//! - [`models`] - Provider payload and canonical chunk types
//! - [`streaming`] - Normalizer and the sync/async adapters
//! - [`transport`] - Byte body to frame stream plumbing

pub mod config;
pub mod error;
pub mod models;
pub mod streaming;
pub mod transport;

pub use config::StreamConfig;
pub use error::{Result, StreamError};
pub use models::{GenericStreamingChunk, ToolCallChunk, ToolCallFunctionChunk, UsageBlock};
pub use streaming::{AsyncChunkStream, StreamState, SyncChunkIterator, normalize};
