//! Configuration loading and validation for Promptmason.
//!
//! Render defaults — total input budget, tokenizer selection, top-level
//! separator — load from a TOML file and are validated up front, so a
//! malformed configuration fails at startup rather than mid-render.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Render defaults for the prompt layout engine.
///
/// Maps directly to a `prompt.toml` file:
///
/// ```toml
/// max_input_tokens = 2048
/// tokenizer = "cl100k"
/// separator = "\n\n"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Total token budget for an assembled prompt
    #[serde(default = "default_max_input_tokens")]
    pub max_input_tokens: usize,

    /// Tokenizer to measure budgets with ("cl100k", "char")
    #[serde(default = "default_tokenizer")]
    pub tokenizer: String,

    /// Separator joining top-level sections in text mode
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Memory path the conversation history section reads from
    #[serde(default = "default_history_path")]
    pub history_path: String,
}

fn default_max_input_tokens() -> usize {
    4096
}
fn default_tokenizer() -> String {
    "cl100k".into()
}
fn default_separator() -> String {
    "\n\n".into()
}
fn default_history_path() -> String {
    "conversation.history".into()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_input_tokens: default_max_input_tokens(),
            tokenizer: default_tokenizer(),
            separator: default_separator(),
            history_path: default_history_path(),
        }
    }
}

impl PromptConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading prompt config");
        let text = std::fs::read_to_string(path)?;
        Self::from_str(&text)
    }

    /// Validate all settings. Called by the loaders; also usable on a
    /// hand-built config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_input_tokens == 0 {
            return Err(ConfigError::Invalid {
                message: "max_input_tokens must be greater than zero".into(),
            });
        }
        if self.tokenizer.is_empty() {
            return Err(ConfigError::Invalid {
                message: "tokenizer must not be empty".into(),
            });
        }
        if self.history_path.is_empty() {
            return Err(ConfigError::Invalid {
                message: "history_path must not be empty".into(),
            });
        }
        Ok(())
    }
}
