//! Top-level orchestration: token allocation and the drop policy.

use async_trait::async_trait;
use promptmason_config::PromptConfig;
use promptmason_core::budget::TokenBudget;
use promptmason_core::context::RenderContext;
use promptmason_core::error::Result;
use promptmason_core::functions::FunctionRegistry;
use promptmason_core::memory::Memory;
use promptmason_core::message::Message;
use promptmason_core::section::{PromptSection, RenderedSection};
use promptmason_core::tokenizer::Tokenizer;
use tracing::{debug, warn};

/// Renders an ordered list of sections into one token-bounded result.
///
/// # Algorithm
///
/// 1. Fixed-budget sections reserve their counts from the total;
///    the remainder is split among proportional sections by fraction;
///    unbounded sections each see the full remainder
/// 2. Every section renders against its allocation, in original order,
///    regardless of the running total
/// 3. While the combined result exceeds the budget and a non-empty
///    optional section survives, the last such section is dropped
///    (rendered to empty) and the total recomputed
/// 4. If only required sections remain and the result still does not
///    fit, it is returned with `too_long = true` — the caller decides
///    whether to reject or forward it
///
/// The engine implements `PromptSection` itself, so a whole layout can
/// nest as one section of a larger prompt.
pub struct LayoutEngine {
    sections: Vec<Box<dyn PromptSection>>,
    separator: String,
    tokens: TokenBudget,
    required: bool,
}

impl LayoutEngine {
    /// An engine over `sections`, joined by `"\n\n"` in text mode.
    pub fn new(sections: Vec<Box<dyn PromptSection>>) -> Self {
        Self {
            sections,
            separator: "\n\n".into(),
            tokens: TokenBudget::Unbounded,
            required: true,
        }
    }

    /// An engine using the configured top-level separator.
    pub fn from_config(config: &PromptConfig, sections: Vec<Box<dyn PromptSection>>) -> Self {
        Self::new(sections).with_separator(config.separator.clone())
    }

    /// Set the string joining section outputs in text mode.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub(crate) fn set_separator(&mut self, separator: String) {
        self.separator = separator;
    }

    /// Set the engine's own budget, used when it nests as a section.
    pub fn with_tokens(mut self, tokens: TokenBudget) -> Self {
        self.tokens = tokens;
        self
    }

    /// Mark the whole set droppable when this engine nests as a section.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Per-section allocations for a total budget.
    ///
    /// Fixed sections reserve their counts; proportional sections get
    /// `round(remaining × fraction)`. Multiple unbounded siblings each
    /// receive the full remainder; the overlapping claims are settled by
    /// the drop pass afterward.
    pub(crate) fn allocations(&self, max_tokens: usize) -> Vec<usize> {
        let reserved: usize = self
            .sections
            .iter()
            .map(|s| match s.tokens() {
                TokenBudget::Fixed(n) => n,
                _ => 0,
            })
            .sum();
        let remaining = max_tokens.saturating_sub(reserved);

        self.sections
            .iter()
            .map(|s| match s.tokens() {
                TokenBudget::Fixed(n) => n,
                TokenBudget::Proportion(fraction) => (remaining as f64 * fraction).round() as usize,
                TokenBudget::Unbounded => remaining,
            })
            .collect()
    }

    /// Index of the last droppable section: optional and still non-empty.
    fn last_droppable<T>(&self, rendered: &[RenderedSection<T>], is_empty: fn(&T) -> bool) -> Option<usize> {
        self.sections
            .iter()
            .enumerate()
            .rev()
            .find(|(i, section)| !section.required() && !is_empty(&rendered[*i].output))
            .map(|(i, _)| i)
    }
}

#[async_trait]
impl PromptSection for LayoutEngine {
    fn tokens(&self) -> TokenBudget {
        self.tokens
    }

    fn required(&self) -> bool {
        self.required
    }

    async fn render_as_text(
        &self,
        context: &RenderContext,
        memory: &dyn Memory,
        functions: &FunctionRegistry,
        tokenizer: &dyn Tokenizer,
        max_tokens: usize,
    ) -> Result<RenderedSection<String>> {
        if self.sections.is_empty() {
            return Ok(RenderedSection::empty_text());
        }

        // Render everything first; dropping decisions need all lengths.
        let allocations = self.allocations(max_tokens);
        debug!(max_tokens, ?allocations, "rendering prompt layout as text");
        let mut rendered = Vec::with_capacity(self.sections.len());
        for (section, allocation) in self.sections.iter().zip(&allocations) {
            rendered.push(
                section
                    .render_as_text(context, memory, functions, tokenizer, *allocation)
                    .await?,
            );
        }

        loop {
            let surviving: Vec<&str> = rendered
                .iter()
                .filter(|r| !r.output.is_empty())
                .map(|r| r.output.as_str())
                .collect();
            let output = surviving.join(&self.separator);
            let length = if output.is_empty() {
                0
            } else {
                tokenizer.count(&output)?
            };

            if length <= max_tokens {
                return Ok(RenderedSection::new(output, length, false));
            }
            match self.last_droppable(&rendered, |text: &String| text.is_empty()) {
                Some(index) => {
                    debug!(index, length, max_tokens, "dropping optional section to fit budget");
                    rendered[index] = RenderedSection::empty_text();
                }
                None => {
                    warn!(length, max_tokens, "prompt over budget with only required sections left");
                    return Ok(RenderedSection::new(output, length, true));
                }
            }
        }
    }

    async fn render_as_messages(
        &self,
        context: &RenderContext,
        memory: &dyn Memory,
        functions: &FunctionRegistry,
        tokenizer: &dyn Tokenizer,
        max_tokens: usize,
    ) -> Result<RenderedSection<Vec<Message>>> {
        if self.sections.is_empty() {
            return Ok(RenderedSection::empty_messages());
        }

        let allocations = self.allocations(max_tokens);
        debug!(max_tokens, ?allocations, "rendering prompt layout as messages");
        let mut rendered = Vec::with_capacity(self.sections.len());
        for (section, allocation) in self.sections.iter().zip(&allocations) {
            rendered.push(
                section
                    .render_as_messages(context, memory, functions, tokenizer, *allocation)
                    .await?,
            );
        }

        loop {
            let length: usize = rendered.iter().map(|r| r.length).sum();
            if length <= max_tokens {
                let output: Vec<Message> =
                    rendered.iter().flat_map(|r| r.output.iter().cloned()).collect();
                return Ok(RenderedSection::new(output, length, false));
            }
            match self.last_droppable(&rendered, |messages: &Vec<Message>| messages.is_empty()) {
                Some(index) => {
                    debug!(index, length, max_tokens, "dropping optional section to fit budget");
                    rendered[index] = RenderedSection::empty_messages();
                }
                None => {
                    warn!(length, max_tokens, "prompt over budget with only required sections left");
                    let output: Vec<Message> =
                        rendered.iter().flat_map(|r| r.output.iter().cloned()).collect();
                    return Ok(RenderedSection::new(output, length, true));
                }
            }
        }
    }
}
