//! Composite sections — a group of children rendered as one unit.

use crate::base::SectionProps;
use crate::layout::LayoutEngine;
use async_trait::async_trait;
use promptmason_core::budget::TokenBudget;
use promptmason_core::context::RenderContext;
use promptmason_core::error::Result;
use promptmason_core::functions::FunctionRegistry;
use promptmason_core::memory::Memory;
use promptmason_core::message::Message;
use promptmason_core::section::{PromptSection, RenderedSection};
use promptmason_core::tokenizer::Tokenizer;

/// An ordered group of child sections rendered against a shared budget.
///
/// Internally the group is a scoped layout engine: fixed children reserve
/// their counts from the group's ceiling, proportional children split the
/// remainder, and optional children are dropped end-first when the group
/// runs over. Earlier children therefore take priority in shortfall
/// scenarios.
///
/// In message mode a group with a `role` flattens all children into
/// exactly one message of that role (contents joined by the group
/// separator, matching text mode); without a role it concatenates the
/// children's message sequences in order.
pub struct GroupSection {
    layout: LayoutEngine,
    role: Option<String>,
    props: SectionProps,
}

impl GroupSection {
    pub fn new(sections: Vec<Box<dyn PromptSection>>) -> Self {
        let props = SectionProps::default();
        Self {
            layout: LayoutEngine::new(sections).with_separator(props.separator.clone()),
            role: None,
            props,
        }
    }

    /// Flatten children into a single message with this role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the token budget for the whole group.
    pub fn with_tokens(mut self, tokens: TokenBudget) -> Self {
        self.props.tokens = tokens;
        self
    }

    /// Mark the group droppable when the prompt runs over budget.
    pub fn optional(mut self) -> Self {
        self.props.required = false;
        self
    }

    /// Set the string joining child outputs.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        self.props.separator = separator.clone();
        self.layout.set_separator(separator);
        self
    }

    /// Set the string prepended when flattening to text.
    pub fn with_text_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.props.text_prefix = prefix.into();
        self
    }

    /// The group's ceiling for a given allocation.
    fn ceiling(&self, max_tokens: usize) -> usize {
        match self.props.tokens {
            TokenBudget::Fixed(fixed) => fixed.min(max_tokens),
            _ => max_tokens,
        }
    }
}

#[async_trait]
impl PromptSection for GroupSection {
    fn tokens(&self) -> TokenBudget {
        self.props.tokens
    }

    fn required(&self) -> bool {
        self.props.required
    }

    async fn render_as_text(
        &self,
        context: &RenderContext,
        memory: &dyn Memory,
        functions: &FunctionRegistry,
        tokenizer: &dyn Tokenizer,
        max_tokens: usize,
    ) -> Result<RenderedSection<String>> {
        let inner = self
            .layout
            .render_as_text(context, memory, functions, tokenizer, self.ceiling(max_tokens))
            .await?;
        if self.props.text_prefix.is_empty() || inner.output.is_empty() {
            return Ok(inner);
        }
        // Length includes the prefix; the fit flag was settled on content.
        let output = format!("{}{}", self.props.text_prefix, inner.output);
        let length = tokenizer.count(&output)?;
        Ok(RenderedSection::new(output, length, inner.too_long))
    }

    async fn render_as_messages(
        &self,
        context: &RenderContext,
        memory: &dyn Memory,
        functions: &FunctionRegistry,
        tokenizer: &dyn Tokenizer,
        max_tokens: usize,
    ) -> Result<RenderedSection<Vec<Message>>> {
        let ceiling = self.ceiling(max_tokens);
        match &self.role {
            Some(role) => {
                let inner = self
                    .layout
                    .render_as_text(context, memory, functions, tokenizer, ceiling)
                    .await?;
                if inner.output.is_empty() {
                    return Ok(RenderedSection::empty_messages());
                }
                Ok(RenderedSection::new(
                    vec![Message::new(role, inner.output)],
                    inner.length,
                    inner.too_long,
                ))
            }
            None => {
                self.layout
                    .render_as_messages(context, memory, functions, tokenizer, ceiling)
                    .await
            }
        }
    }
}
