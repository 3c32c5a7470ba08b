//! Render context — per-request metadata handed through to sections
//! and prompt functions.
//!
//! The engine itself never inspects the context; it exists so that
//! functions resolving template placeholders can see which conversation
//! turn they are rendering for.

use serde_json::Value;

/// Execution context for a single prompt render.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// The conversation this render belongs to, if any.
    pub conversation_id: Option<String>,

    /// Caller-supplied request metadata (channel, locale, etc.).
    pub data: serde_json::Map<String, Value>,
}

impl RenderContext {
    /// Context for a specific conversation.
    pub fn for_conversation(id: impl Into<String>) -> Self {
        Self {
            conversation_id: Some(id.into()),
            data: serde_json::Map::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }
}
