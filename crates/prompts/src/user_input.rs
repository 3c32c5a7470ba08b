//! The current user turn, read from memory at render time.

use crate::base::{self, SectionProps};
use async_trait::async_trait;
use promptmason_core::budget::TokenBudget;
use promptmason_core::context::RenderContext;
use promptmason_core::error::Result;
use promptmason_core::functions::FunctionRegistry;
use promptmason_core::memory::Memory;
use promptmason_core::message::Message;
use promptmason_core::section::{PromptSection, RenderedSection};
use promptmason_core::tokenizer::Tokenizer;
use promptmason_core::value::value_to_string;

/// Renders the pending user input stored in memory.
///
/// Defaults to the `"temp.input"` path, the `user` role, and a
/// `"user: "` text prefix. A missing or null value renders empty.
pub struct UserInputSection {
    path: String,
    role: String,
    props: SectionProps,
}

impl Default for UserInputSection {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInputSection {
    pub fn new() -> Self {
        Self {
            path: "temp.input".to_string(),
            role: "user".to_string(),
            props: SectionProps {
                text_prefix: "user: ".to_string(),
                ..SectionProps::default()
            },
        }
    }

    /// Read the input from a different memory path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the token budget.
    pub fn with_tokens(mut self, tokens: TokenBudget) -> Self {
        self.props.tokens = tokens;
        self
    }

    /// Mark the section droppable when the prompt runs over budget.
    pub fn optional(mut self) -> Self {
        self.props.required = false;
        self
    }

    /// Set the string prepended when flattening to text.
    pub fn with_text_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.props.text_prefix = prefix.into();
        self
    }

    fn input(&self, memory: &dyn Memory) -> Result<String> {
        Ok(memory
            .get_value(&self.path)?
            .as_ref()
            .map(value_to_string)
            .unwrap_or_default())
    }
}

#[async_trait]
impl PromptSection for UserInputSection {
    fn tokens(&self) -> TokenBudget {
        self.props.tokens
    }

    fn required(&self) -> bool {
        self.props.required
    }

    async fn render_as_text(
        &self,
        _context: &RenderContext,
        memory: &dyn Memory,
        _functions: &FunctionRegistry,
        tokenizer: &dyn Tokenizer,
        max_tokens: usize,
    ) -> Result<RenderedSection<String>> {
        let input = self.input(memory)?;
        let clipped = base::clip_to_budget(self.props.tokens, &input, tokenizer, max_tokens)?;
        base::text_result(&self.props, clipped, tokenizer)
    }

    async fn render_as_messages(
        &self,
        _context: &RenderContext,
        memory: &dyn Memory,
        _functions: &FunctionRegistry,
        tokenizer: &dyn Tokenizer,
        max_tokens: usize,
    ) -> Result<RenderedSection<Vec<Message>>> {
        let input = self.input(memory)?;
        let clipped = base::clip_to_budget(self.props.tokens, &input, tokenizer, max_tokens)?;
        Ok(base::message_result(&self.role, clipped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptmason_memory::VolatileMemory;
    use promptmason_tokenizers::CharTokenizer;
    use serde_json::json;

    #[tokio::test]
    async fn reads_input_from_default_path() {
        let memory = VolatileMemory::new();
        memory.set_value("temp.input", json!("hi there")).unwrap();

        let rendered = UserInputSection::new()
            .render_as_messages(
                &RenderContext::default(),
                &memory,
                &FunctionRegistry::new(),
                &CharTokenizer,
                100,
            )
            .await
            .unwrap();
        assert_eq!(rendered.output, vec![Message::user("hi there")]);
        assert_eq!(rendered.length, 8);
    }

    #[tokio::test]
    async fn text_mode_applies_user_prefix() {
        let memory = VolatileMemory::new();
        memory.set_value("temp.input", json!("hi")).unwrap();

        let rendered = UserInputSection::new()
            .render_as_text(
                &RenderContext::default(),
                &memory,
                &FunctionRegistry::new(),
                &CharTokenizer,
                100,
            )
            .await
            .unwrap();
        assert_eq!(rendered.output, "user: hi");
        assert_eq!(rendered.length, 8);
    }

    #[tokio::test]
    async fn missing_input_renders_empty() {
        let rendered = UserInputSection::new()
            .render_as_messages(
                &RenderContext::default(),
                &VolatileMemory::new(),
                &FunctionRegistry::new(),
                &CharTokenizer,
                100,
            )
            .await
            .unwrap();
        assert!(rendered.output.is_empty());
        assert_eq!(rendered.length, 0);
        assert!(!rendered.too_long);
    }

    #[tokio::test]
    async fn fixed_budget_truncates_input() {
        let memory = VolatileMemory::new();
        memory
            .set_value("conversation.draft", json!("0123456789"))
            .unwrap();

        let rendered = UserInputSection::new()
            .with_path("conversation.draft")
            .with_tokens(TokenBudget::fixed(4))
            .render_as_messages(
                &RenderContext::default(),
                &memory,
                &FunctionRegistry::new(),
                &CharTokenizer,
                100,
            )
            .await
            .unwrap();
        assert_eq!(rendered.output, vec![Message::user("0123")]);
        assert!(rendered.too_long);
    }
}
