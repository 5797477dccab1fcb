use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Error receiving chunk from stream: {0}")]
    TransportError(String),

    #[error("Upstream error: {message}")]
    UpstreamError {
        message: String,
        code: Option<String>,
        body: serde_json::Value,
    },

    #[error("Failed to decode chunk: {0}")]
    DecodeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StreamError {
    /// Build an upstream error from the provider's embedded `error` value.
    ///
    /// Accepts both `{"message": ..., "code": ...}` objects and bare values.
    pub fn upstream(body: serde_json::Value) -> Self {
        let message = match body.get("message").and_then(|m| m.as_str()) {
            Some(message) => message.to_string(),
            None => match &body {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        };

        let code = body.get("code").and_then(|code| match code {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        StreamError::UpstreamError {
            message,
            code,
            body,
        }
    }

    /// Whether the error has to end the stream.
    ///
    /// Decode errors are absorbed by the adapters and replaced with an empty chunk.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, StreamError::DecodeError(_))
    }
}

pub type Result<T> = std::result::Result<T, StreamError>;
