//! Message value type.
//!
//! Messages are the structured output of message-mode rendering: a role
//! tag plus optional text content. They are produced by section rendering
//! and consumed by whatever model-calling layer sits above the engine —
//! the layout engine itself only ever creates one to wrap flattened text.

use serde::{Deserialize, Serialize};

/// A single prompt message.
///
/// The role is a free-form tag rather than a closed enum: "system",
/// "user", "assistant" and "tool" are conventional, but sections may emit
/// any role their model provider understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who this message is attributed to
    pub role: String,

    /// The text content, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Message {
    /// Create a message with the given role and content.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: Some(content.into()),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// The content, or the empty string if there is none.
    pub fn content_str(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}
