//! Tokenizer trait — the unit of measure for all budgets.
//!
//! Every token budget in the engine is expressed in the tokens this trait
//! produces. Truncation correctness depends on encode/decode being exact:
//! `decode(&encode(text)[..k])` must be a prefix of `text` of known token
//! length `k`. Heuristic estimators cannot satisfy that contract and do
//! not belong behind this trait.

use crate::error::TokenizerError;

/// Converts text to a sequence of integer token ids and back.
///
/// Implementations must be deterministic, exact, and stateless — a single
/// instance is safe to share across concurrent render pipelines.
pub trait Tokenizer: Send + Sync {
    /// The tokenizer name (e.g. "cl100k", "char").
    fn name(&self) -> &str;

    /// Encode text into token ids.
    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError>;

    /// Decode token ids back into text.
    fn decode(&self, tokens: &[u32]) -> Result<String, TokenizerError>;

    /// Token count of `text`. Equivalent to `encode(text).len()`.
    fn count(&self, text: &str) -> Result<usize, TokenizerError> {
        Ok(self.encode(text)?.len())
    }
}
