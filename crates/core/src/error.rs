//! Error types for the Promptmason domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant. Collaborator failures
//! (tokenizer, memory, functions) propagate unchanged through the section
//! and layout layers — the engine adds no translation of its own.

use thiserror::Error;

/// The top-level error type for all Promptmason operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Tokenizer errors ---
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),

    // --- Memory errors ---
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    // --- Function resolution errors ---
    #[error("Function error: {0}")]
    Function(#[from] FunctionError),

    // --- Configuration errors (construction-time validation) ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a construction-time configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum TokenizerError {
    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Decoding failed: {0}")]
    Decode(String),

    #[error("Unknown tokenizer: {0}")]
    Unknown(String),

    #[error("Failed to load tokenizer: {0}")]
    LoadFailed(String),
}

#[derive(Debug, Clone, Error)]
pub enum MemoryError {
    #[error("Invalid memory path: {0} (expected `property` or `scope.property`)")]
    InvalidPath(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, Error)]
pub enum FunctionError {
    #[error("Function not found: {0}")]
    NotFound(String),

    #[error("Function failed: {name}: {reason}")]
    Failed { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizer_error_displays_correctly() {
        let err = Error::Tokenizer(TokenizerError::Encode("invalid byte sequence".into()));
        assert!(err.to_string().contains("Encoding failed"));
        assert!(err.to_string().contains("invalid byte sequence"));
    }

    #[test]
    fn function_error_displays_correctly() {
        let err = Error::Function(FunctionError::Failed {
            name: "get_weather".into(),
            reason: "upstream timeout".into(),
        });
        assert!(err.to_string().contains("get_weather"));
        assert!(err.to_string().contains("upstream timeout"));
    }

    #[test]
    fn config_shorthand() {
        let err = Error::config("token fraction must be in (0, 1]");
        assert!(err.to_string().contains("token fraction"));
    }
}
