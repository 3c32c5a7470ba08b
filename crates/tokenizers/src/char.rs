//! One-token-per-character tokenizer.

use promptmason_core::error::TokenizerError;
use promptmason_core::tokenizer::Tokenizer;

/// Tokenizes one Unicode scalar per token (the id is the code point).
///
/// Exact and prefix-consistent by construction, which makes budget
/// arithmetic trivially predictable — the deterministic choice when no
/// model vocabulary applies, and the workhorse of the engine's own tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharTokenizer;

impl Tokenizer for CharTokenizer {
    fn name(&self) -> &str {
        "char"
    }

    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError> {
        Ok(text.chars().map(|c| c as u32).collect())
    }

    fn decode(&self, tokens: &[u32]) -> Result<String, TokenizerError> {
        tokens
            .iter()
            .map(|&id| {
                char::from_u32(id).ok_or_else(|| {
                    TokenizerError::Decode(format!("invalid code point: {id:#x}"))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_token_per_char() {
        let tok = CharTokenizer;
        assert_eq!(tok.count("hello").unwrap(), 5);
        assert_eq!(tok.count("").unwrap(), 0);
        assert_eq!(tok.count("héllo").unwrap(), 5);
    }

    #[test]
    fn prefix_truncation_is_exact() {
        let tok = CharTokenizer;
        let encoded = tok.encode("hello world").unwrap();
        assert_eq!(tok.decode(&encoded[..5]).unwrap(), "hello");
    }

    #[test]
    fn invalid_code_point_fails() {
        let tok = CharTokenizer;
        assert!(tok.decode(&[0xD800]).is_err());
    }
}
