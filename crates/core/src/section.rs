//! The section rendering contract.
//!
//! A section is the atomic renderable unit of a prompt. Every renderable
//! component — static text, templates, conversation history, composite
//! groups, the layout engine itself — implements both render modes:
//! flat text and a structured message list. The two modes must agree on
//! token accounting for the same content.

use crate::budget::TokenBudget;
use crate::context::RenderContext;
use crate::error::Result;
use crate::functions::FunctionRegistry;
use crate::memory::Memory;
use crate::message::Message;
use crate::tokenizer::Tokenizer;
use async_trait::async_trait;

/// The output of rendering one section (or a whole prompt).
///
/// `length` is the tokenizer-measured size of `output` — not necessarily
/// the sum of any child lengths, since separators and prefixes consume
/// tokens of their own. `too_long` signals that the content did not fit
/// the budget this render was given; it is an expected outcome, not an
/// error, and callers decide whether to reject or forward the result.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection<T> {
    pub output: T,
    pub length: usize,
    pub too_long: bool,
}

impl<T> RenderedSection<T> {
    pub fn new(output: T, length: usize, too_long: bool) -> Self {
        Self {
            output,
            length,
            too_long,
        }
    }
}

impl RenderedSection<String> {
    /// An empty text result — what a dropped section renders to.
    pub fn empty_text() -> Self {
        Self::new(String::new(), 0, false)
    }
}

impl RenderedSection<Vec<Message>> {
    /// An empty message result — what a dropped section renders to.
    pub fn empty_messages() -> Self {
        Self::new(Vec::new(), 0, false)
    }
}

/// A renderable prompt component.
///
/// Sections are immutable after construction and stateless across render
/// calls; both render methods are pure functions of their arguments. The
/// `max_tokens` argument is the allocation already resolved by the caller
/// (typically the layout engine), not the section's configured budget.
#[async_trait]
pub trait PromptSection: Send + Sync {
    /// The section's configured token budget.
    fn tokens(&self) -> TokenBudget;

    /// Whether this section must appear in the output even when it causes
    /// overflow. Optional sections may be dropped entirely to fit budget.
    fn required(&self) -> bool;

    /// Render to flat text.
    async fn render_as_text(
        &self,
        context: &RenderContext,
        memory: &dyn Memory,
        functions: &FunctionRegistry,
        tokenizer: &dyn Tokenizer,
        max_tokens: usize,
    ) -> Result<RenderedSection<String>>;

    /// Render to a structured message list.
    async fn render_as_messages(
        &self,
        context: &RenderContext,
        memory: &dyn Memory,
        functions: &FunctionRegistry,
        tokenizer: &dyn Tokenizer,
        max_tokens: usize,
    ) -> Result<RenderedSection<Vec<Message>>>;
}
