//! # Promptmason Core
//!
//! Domain types, traits, and error definitions for the Promptmason prompt
//! rendering engine. This crate has **zero framework dependencies** — it
//! defines the contracts that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every collaborator the rendering engine consumes (tokenizer, memory,
//! function table) is defined as a trait here. Implementations live in
//! their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with deterministic stand-ins
//! - Clean dependency graph (all crates depend inward on core)

pub mod budget;
pub mod context;
pub mod error;
pub mod functions;
pub mod memory;
pub mod message;
pub mod section;
pub mod tokenizer;
pub mod value;

// Re-export key types at crate root for ergonomics
pub use budget::TokenBudget;
pub use context::RenderContext;
pub use error::{Error, FunctionError, MemoryError, Result, TokenizerError};
pub use functions::{FunctionRegistry, PromptFunction};
pub use memory::{Memory, MemoryPath};
pub use message::Message;
pub use section::{PromptSection, RenderedSection};
pub use tokenizer::Tokenizer;
