//! The prompt layout engine — the core of Promptmason.
//!
//! A prompt is an ordered tree of sections. Given a total token budget,
//! the layout engine:
//!
//! 1. **Allocates** — fixed-budget sections reserve their counts, the
//!    remainder is split among proportional sections by fraction, and
//!    unbounded sections see whatever is left
//! 2. **Renders** — every section renders against its allocation, in
//!    order, in both modes (flat text and structured message list)
//! 3. **Fits** — if the combined result exceeds the budget, optional
//!    sections are dropped end-first until it fits; required sections
//!    are never dropped, only truncated by their own fixed ceilings
//!
//! Overflow that survives the drop pass is reported via `too_long` on
//! the result — an expected outcome the caller decides policy for, not
//! an error.

pub mod base;
pub mod group;
pub mod history;
pub mod layout;
pub mod template;
pub mod text;
pub mod user_input;

pub use group::GroupSection;
pub use history::ConversationHistorySection;
pub use layout::LayoutEngine;
pub use template::TemplateSection;
pub use text::TextSection;
pub use user_input::UserInputSection;

// Re-export the contract types callers need alongside the sections
pub use promptmason_core::functions::FunctionRegistry;
pub use promptmason_core::{
    Message, PromptSection, RenderContext, RenderedSection, TokenBudget,
};
