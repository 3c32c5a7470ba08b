//! Conversation history rendered from memory, newest-first fitting.

use crate::base::SectionProps;
use async_trait::async_trait;
use promptmason_core::budget::TokenBudget;
use promptmason_core::context::RenderContext;
use promptmason_core::error::Result;
use promptmason_core::functions::FunctionRegistry;
use promptmason_core::memory::Memory;
use promptmason_core::message::Message;
use promptmason_core::section::{PromptSection, RenderedSection};
use promptmason_core::tokenizer::Tokenizer;
use tracing::debug;

/// Renders the message history stored at a memory path.
///
/// Messages are fitted newest-first: walking backward from the most
/// recent turn, whole messages are kept while they fit the budget and
/// the rest is dropped. A message is never split. Output preserves
/// chronological order. Because the section trims itself to its
/// allocation, it never reports `too_long`.
///
/// Defaults: proportional budget of 1.0 (all of the post-fixed
/// remainder), optional, `"\n"` separator.
pub struct ConversationHistorySection {
    path: String,
    props: SectionProps,
}

impl ConversationHistorySection {
    /// Read history from the memory path (e.g. `"conversation.history"`).
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            props: SectionProps {
                tokens: TokenBudget::Proportion(1.0),
                required: false,
                ..SectionProps::default()
            },
        }
    }

    /// Set the token budget.
    pub fn with_tokens(mut self, tokens: TokenBudget) -> Self {
        self.props.tokens = tokens;
        self
    }

    /// Require the section to survive the drop pass.
    pub fn required(mut self) -> Self {
        self.props.required = true;
        self
    }

    /// Set the string joining history lines in text mode.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.props.separator = separator.into();
        self
    }

    fn budget(&self, max_tokens: usize) -> usize {
        match self.props.tokens {
            TokenBudget::Fixed(fixed) => fixed.min(max_tokens),
            _ => max_tokens,
        }
    }

    fn load(&self, memory: &dyn Memory) -> Result<Vec<Message>> {
        let Some(value) = memory.get_value(&self.path)? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl PromptSection for ConversationHistorySection {
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
        let history = self.load(memory)?;
        let budget = self.budget(max_tokens);
        let separator_tokens = tokenizer.count(&self.props.separator)?;

        // Fit whole lines newest-first; the separator costs tokens too.
        let mut lines: Vec<String> = Vec::new();
        let mut length = 0;
        for message in history.iter().rev() {
            let line = format!("{}: {}", message.role, message.content_str());
            let line_tokens = tokenizer.count(&line)?;
            let cost = line_tokens + if lines.is_empty() { 0 } else { separator_tokens };
            if length + cost > budget {
                break;
            }
            length += cost;
            lines.push(line);
        }
        debug!(kept = lines.len(), total = history.len(), "fitted history lines");

        lines.reverse();
        Ok(RenderedSection::new(
            lines.join(&self.props.separator),
            length,
            false,
        ))
    }

    async fn render_as_messages(
        &self,
        _context: &RenderContext,
        memory: &dyn Memory,
        _functions: &FunctionRegistry,
        tokenizer: &dyn Tokenizer,
        max_tokens: usize,
    ) -> Result<RenderedSection<Vec<Message>>> {
        let history = self.load(memory)?;
        let budget = self.budget(max_tokens);

        let mut selected: Vec<Message> = Vec::new();
        let mut length = 0;
        for message in history.iter().rev() {
            let tokens = tokenizer.count(message.content_str())?;
            if length + tokens > budget {
                break;
            }
            length += tokens;
            selected.push(message.clone());
        }
        debug!(kept = selected.len(), total = history.len(), "fitted history messages");

        selected.reverse();
        Ok(RenderedSection::new(selected, length, false))
    }
}
