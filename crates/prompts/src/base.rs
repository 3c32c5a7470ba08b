//! Shared attributes and token accounting for leaf sections.
//!
//! Every leaf section ends up with a resolved text to fit into an
//! allocation; the clipping and prefixing rules live here so that text
//! sections, templates, and user input all account tokens identically.

use promptmason_core::budget::TokenBudget;
use promptmason_core::error::Result;
use promptmason_core::message::Message;
use promptmason_core::section::RenderedSection;
use promptmason_core::tokenizer::Tokenizer;
use tracing::debug;

/// Configuration attributes common to all sections.
#[derive(Debug, Clone)]
pub struct SectionProps {
    pub tokens: TokenBudget,
    pub required: bool,
    pub separator: String,
    pub text_prefix: String,
}

impl Default for SectionProps {
    fn default() -> Self {
        Self {
            tokens: TokenBudget::Unbounded,
            required: true,
            separator: "\n".into(),
            text_prefix: String::new(),
        }
    }
}

/// Resolved content fitted against a budget.
#[derive(Debug, Clone)]
pub struct Clipped {
    pub text: String,
    pub length: usize,
    pub too_long: bool,
}

/// Fit `text` against the section's budget and the caller's allocation.
///
/// Only fixed budgets truncate: their ceiling is `min(fixed, max_tokens)`
/// and content over it is cut at an exact token boundary. Proportional
/// and unbounded sections render in full — their share was already
/// resolved into `max_tokens` by the layout engine — and merely flag
/// `too_long` when they exceed it, leaving the drop pass to decide.
pub fn clip_to_budget(
    budget: TokenBudget,
    text: &str,
    tokenizer: &dyn Tokenizer,
    max_tokens: usize,
) -> Result<Clipped> {
    let encoded = tokenizer.encode(text)?;
    match budget {
        TokenBudget::Fixed(fixed) => {
            let ceiling = fixed.min(max_tokens);
            if encoded.len() <= ceiling {
                Ok(Clipped {
                    text: text.to_string(),
                    length: encoded.len(),
                    too_long: false,
                })
            } else {
                let truncated = tokenizer.decode(&encoded[..ceiling])?;
                debug!(ceiling, content_tokens = encoded.len(), "truncating section content");
                Ok(Clipped {
                    text: truncated,
                    length: ceiling,
                    too_long: true,
                })
            }
        }
        _ => Ok(Clipped {
            text: text.to_string(),
            length: encoded.len(),
            too_long: encoded.len() > max_tokens,
        }),
    }
}

/// Assemble a text-mode result from clipped content.
///
/// The ceiling check in `clip_to_budget` runs on content only; the
/// reported `length` is remeasured on the prefixed string. A prefix can
/// therefore push a fitting result past its nominal ceiling without
/// flipping `too_long`.
pub fn text_result(
    props: &SectionProps,
    clipped: Clipped,
    tokenizer: &dyn Tokenizer,
) -> Result<RenderedSection<String>> {
    if props.text_prefix.is_empty() || clipped.text.is_empty() {
        return Ok(RenderedSection::new(
            clipped.text,
            clipped.length,
            clipped.too_long,
        ));
    }
    let output = format!("{}{}", props.text_prefix, clipped.text);
    let length = tokenizer.count(&output)?;
    Ok(RenderedSection::new(output, length, clipped.too_long))
}

/// Assemble a message-mode result from clipped content.
///
/// Empty content renders zero messages, not an empty message.
pub fn message_result(role: &str, clipped: Clipped) -> RenderedSection<Vec<Message>> {
    if clipped.text.is_empty() {
        return RenderedSection::empty_messages();
    }
    RenderedSection::new(
        vec![Message::new(role, clipped.text)],
        clipped.length,
        clipped.too_long,
    )
}
