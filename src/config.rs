use crate::error::{Result, StreamError};
use crate::streaming::frame::{DEFAULT_FRAMING_PREFIX, DEFAULT_TERMINATOR, FrameOptions};
use serde::Deserialize;
use std::env;
use std::fs;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Marker stripped from the front of each frame
    pub framing_prefix: String,
    /// Sentinel payload that ends an async stream
    pub terminator: String,
    /// Also stop the blocking adapter on the sentinel instead of degrading it
    pub sync_honors_terminator: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            framing_prefix: DEFAULT_FRAMING_PREFIX.to_string(),
            terminator: DEFAULT_TERMINATOR.to_string(),
            sync_honors_terminator: false,
        }
    }
}

impl StreamConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = StreamConfig::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| StreamError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_toml(&contents)?;

        // Allow environment variables to override file config
        config.apply_env()?;

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| StreamError::ConfigError(format!("Failed to parse config file: {}", e)))
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(prefix) = env::var("STREAM_FRAMING_PREFIX") {
            self.framing_prefix = prefix;
        }

        if let Ok(terminator) = env::var("STREAM_TERMINATOR") {
            self.terminator = terminator;
        }

        if let Ok(value) = env::var("STREAM_SYNC_HONORS_TERMINATOR") {
            self.sync_honors_terminator = value.parse::<bool>().map_err(|e| {
                StreamError::ConfigError(format!(
                    "Invalid STREAM_SYNC_HONORS_TERMINATOR value: {}",
                    e
                ))
            })?;
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.terminator.trim().is_empty() {
            return Err(StreamError::ConfigError(
                "Terminator is empty".to_string(),
            ));
        }

        if self.framing_prefix.chars().any(char::is_whitespace) {
            return Err(StreamError::ConfigError(
                "Framing prefix must not contain whitespace".to_string(),
            ));
        }

        Ok(())
    }

    pub fn sync_options(&self) -> FrameOptions {
        FrameOptions {
            prefix: self.framing_prefix.clone(),
            terminator: self
                .sync_honors_terminator
                .then(|| self.terminator.clone()),
        }
    }

    pub fn async_options(&self) -> FrameOptions {
        FrameOptions {
            prefix: self.framing_prefix.clone(),
            terminator: Some(self.terminator.clone()),
        }
    }
}
