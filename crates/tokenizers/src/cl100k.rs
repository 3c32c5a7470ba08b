//! Exact cl100k BPE tokenizer via `tiktoken-rs`.

use promptmason_core::error::TokenizerError;
use promptmason_core::tokenizer::Tokenizer;
use tiktoken_rs::CoreBPE;

/// The cl100k_base byte-pair encoding used by the GPT-3.5/4 model family.
///
/// The vocabulary ships embedded in `tiktoken-rs`, so construction needs
/// no files or network. Special tokens are not produced on encode —
/// budgets measure plain prompt text.
pub struct Cl100kTokenizer {
    bpe: CoreBPE,
}

impl Cl100kTokenizer {
    pub fn new() -> Result<Self, TokenizerError> {
        let bpe = tiktoken_rs::cl100k_base()
            .map_err(|e| TokenizerError::LoadFailed(format!("cl100k_base: {e}")))?;
        Ok(Self { bpe })
    }
}

impl Tokenizer for Cl100kTokenizer {
    fn name(&self) -> &str {
        "cl100k"
    }

    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError> {
        Ok(self.bpe.encode_ordinary(text))
    }

    fn decode(&self, tokens: &[u32]) -> Result<String, TokenizerError> {
        self.bpe
            .decode(tokens.to_vec())
            .map_err(|e| TokenizerError::Decode(e.to_string()))
    }
}
