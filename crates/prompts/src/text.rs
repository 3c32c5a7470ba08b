//! Static text sections — the canonical leaf.

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

/// A section with fixed text content and a message role.
///
/// Defaults: unbounded budget, required, `"\n"` separator, no text prefix.
#[derive(Debug, Clone)]
pub struct TextSection {
    text: String,
    role: String,
    props: SectionProps,
}

impl TextSection {
    pub fn new(text: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: role.into(),
            props: SectionProps::default(),
        }
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

    /// Set the string prepended when flattening to text (e.g. `"user: "`).
    pub fn with_text_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.props.text_prefix = prefix.into();
        self
    }
}

#[async_trait]
impl PromptSection for TextSection {
    fn tokens(&self) -> TokenBudget {
        self.props.tokens
    }

    fn required(&self) -> bool {
        self.props.required
    }

    async fn render_as_text(
        &self,
        _context: &RenderContext,
        _memory: &dyn Memory,
        _functions: &FunctionRegistry,
        tokenizer: &dyn Tokenizer,
        max_tokens: usize,
    ) -> Result<RenderedSection<String>> {
        let clipped = base::clip_to_budget(self.props.tokens, &self.text, tokenizer, max_tokens)?;
        base::text_result(&self.props, clipped, tokenizer)
    }

    async fn render_as_messages(
        &self,
        _context: &RenderContext,
        _memory: &dyn Memory,
        _functions: &FunctionRegistry,
        tokenizer: &dyn Tokenizer,
        max_tokens: usize,
    ) -> Result<RenderedSection<Vec<Message>>> {
        let clipped = base::clip_to_budget(self.props.tokens, &self.text, tokenizer, max_tokens)?;
        Ok(base::message_result(&self.role, clipped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptmason_memory::NoopMemory;
    use promptmason_tokenizers::CharTokenizer;

    async fn render_text(section: &TextSection, max_tokens: usize) -> RenderedSection<String> {
        section
            .render_as_text(
                &RenderContext::default(),
                &NoopMemory,
                &FunctionRegistry::new(),
                &CharTokenizer,
                max_tokens,
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn fitting_content_is_unchanged() {
        let section = TextSection::new("hello", "user");
        let rendered = render_text(&section, 100).await;
        assert_eq!(rendered.output, "hello");
        assert_eq!(rendered.length, 5);
        assert!(!rendered.too_long);
    }

    #[tokio::test]
    async fn unbounded_section_is_flagged_but_not_truncated() {
        let section = TextSection::new("hello world", "user");
        let rendered = render_text(&section, 4).await;
        assert_eq!(rendered.output, "hello world");
        assert_eq!(rendered.length, 11);
        assert!(rendered.too_long);
    }

    #[tokio::test]
    async fn fixed_budget_truncates_at_token_boundary() {
        let section = TextSection::new("hello world", "user").with_tokens(TokenBudget::fixed(5));
        let rendered = render_text(&section, 100).await;
        assert_eq!(rendered.output, "hello");
        assert_eq!(rendered.length, 5);
        assert!(rendered.too_long);
    }

    #[tokio::test]
    async fn fixed_ceiling_respects_allocation() {
        // Configured for 8 tokens but only allocated 3
        let section = TextSection::new("hello world", "user").with_tokens(TokenBudget::fixed(8));
        let rendered = render_text(&section, 3).await;
        assert_eq!(rendered.output, "hel");
        assert_eq!(rendered.length, 3);
        assert!(rendered.too_long);
    }

    #[tokio::test]
    async fn prefix_counts_toward_length_but_not_ceiling() {
        let section = TextSection::new("abcdef", "user")
            .with_tokens(TokenBudget::fixed(3))
            .with_text_prefix("user: ");
        let rendered = render_text(&section, 100).await;
        // Ceiling applied to content only; length remeasured with prefix.
        assert_eq!(rendered.output, "user: abc");
        assert_eq!(rendered.length, 9);
        assert!(rendered.too_long);
    }

    #[tokio::test]
    async fn prefix_does_not_flip_too_long() {
        let section = TextSection::new("abc", "user")
            .with_tokens(TokenBudget::fixed(3))
            .with_text_prefix("user: ");
        let rendered = render_text(&section, 100).await;
        assert_eq!(rendered.output, "user: abc");
        assert_eq!(rendered.length, 9);
        assert!(!rendered.too_long);
    }

    #[tokio::test]
    async fn message_mode_wraps_content_with_role() {
        let section = TextSection::new("hello", "system");
        let rendered = section
            .render_as_messages(
                &RenderContext::default(),
                &NoopMemory,
                &FunctionRegistry::new(),
                &CharTokenizer,
                100,
            )
            .await
            .unwrap();
        assert_eq!(rendered.output, vec![Message::system("hello")]);
        assert_eq!(rendered.length, 5);
    }

    #[tokio::test]
    async fn empty_content_renders_no_messages() {
        let section = TextSection::new("", "user");
        let rendered = section
            .render_as_messages(
                &RenderContext::default(),
                &NoopMemory,
                &FunctionRegistry::new(),
                &CharTokenizer,
                100,
            )
            .await
            .unwrap();
        assert!(rendered.output.is_empty());
        assert_eq!(rendered.length, 0);
    }

    #[tokio::test]
    async fn text_and_message_lengths_agree_without_prefix() {
        let section = TextSection::new("hello world", "user");
        let ctx = RenderContext::default();
        let functions = FunctionRegistry::new();
        let as_text = section
            .render_as_text(&ctx, &NoopMemory, &functions, &CharTokenizer, 100)
            .await
            .unwrap();
        let as_messages = section
            .render_as_messages(&ctx, &NoopMemory, &functions, &CharTokenizer, 100)
            .await
            .unwrap();
        assert_eq!(as_text.length, as_messages.length);
    }
}
