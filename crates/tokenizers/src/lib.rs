//! Tokenizer implementations for Promptmason.
//!
//! The engine's truncation correctness depends on exact, deterministic
//! encode/decode (see `promptmason_core::tokenizer`), so every
//! implementation here is lossless over its own ids:
//! - `Cl100kTokenizer` — the cl100k BPE (GPT-3.5/4 family) via
//!   `tiktoken-rs`; vocabulary is embedded, no files or network needed
//! - `HuggingFaceTokenizer` — any `tokenizer.json` vocabulary via the
//!   `tokenizers` crate, for locally hosted models
//! - `CharTokenizer` — one token per character; a deterministic fallback
//!   when no model vocabulary applies

pub mod char;
pub mod cl100k;
pub mod huggingface;

pub use crate::char::CharTokenizer;
pub use cl100k::Cl100kTokenizer;
pub use huggingface::HuggingFaceTokenizer;

use promptmason_core::error::TokenizerError;
use promptmason_core::tokenizer::Tokenizer;
use std::sync::Arc;

/// Create a tokenizer by configured name.
///
/// Recognized names: `"cl100k"`, `"char"`. Anything else is a
/// configuration error rather than a silent fallback.
pub fn create_tokenizer(name: &str) -> Result<Arc<dyn Tokenizer>, TokenizerError> {
    match name {
        "cl100k" => Ok(Arc::new(Cl100kTokenizer::new()?)),
        "char" => Ok(Arc::new(CharTokenizer)),
        other => Err(TokenizerError::Unknown(other.to_string())),
    }
}
