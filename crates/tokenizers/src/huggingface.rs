//! Hugging Face `tokenizer.json` adapter.

use promptmason_core::error::TokenizerError;
use promptmason_core::tokenizer::Tokenizer;
use std::path::Path;
use tracing::debug;

/// A tokenizer backed by a Hugging Face `tokenizer.json` vocabulary,
/// for prompts destined for locally hosted models.
///
/// Special tokens are neither added on encode nor emitted on decode, so
/// token counts reflect plain prompt text just like the BPE adapters.
pub struct HuggingFaceTokenizer {
    inner: tokenizers::Tokenizer,
    name: String,
}

impl HuggingFaceTokenizer {
    /// Load a vocabulary from a `tokenizer.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TokenizerError> {
        let path = path.as_ref();
        let inner = tokenizers::Tokenizer::from_file(path)
            .map_err(|e| TokenizerError::LoadFailed(format!("{}: {e}", path.display())))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "huggingface".to_string());
        debug!(%name, "loaded huggingface tokenizer");
        Ok(Self { inner, name })
    }
}

impl Tokenizer for HuggingFaceTokenizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| TokenizerError::Encode(e.to_string()))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(&self, tokens: &[u32]) -> Result<String, TokenizerError> {
        self.inner
            .decode(tokens, true)
            .map_err(|e| TokenizerError::Decode(e.to_string()))
    }
}
