//! Prompt functions — named callables that resolve template placeholders.
//!
//! A `{{name arg1 arg2}}` block in a template resolves through the
//! `FunctionRegistry` at render time. Functions are async because
//! resolution may reach out to external data sources; the engine awaits
//! them in section order, never concurrently.

use crate::context::RenderContext;
use crate::error::FunctionError;
use crate::memory::Memory;
use crate::tokenizer::Tokenizer;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A callable that resolves a template placeholder to a value.
#[async_trait]
pub trait PromptFunction: Send + Sync {
    async fn invoke(
        &self,
        context: &RenderContext,
        memory: &dyn Memory,
        tokenizer: &dyn Tokenizer,
        args: &[String],
    ) -> Result<Value, FunctionError>;
}

/// Adapter so plain synchronous closures can be registered as functions.
struct FnFunction<F>(F);

#[async_trait]
impl<F> PromptFunction for FnFunction<F>
where
    F: Fn(&RenderContext, &dyn Memory, &[String]) -> Result<Value, FunctionError> + Send + Sync,
{
    async fn invoke(
        &self,
        context: &RenderContext,
        memory: &dyn Memory,
        _tokenizer: &dyn Tokenizer,
        args: &[String],
    ) -> Result<Value, FunctionError> {
        (self.0)(context, memory, args)
    }
}

/// Name → function table consumed by template rendering.
#[derive(Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn PromptFunction>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, function: Arc<dyn PromptFunction>) {
        self.functions.insert(name.into(), function);
    }

    /// Register a synchronous closure under `name`.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&RenderContext, &dyn Memory, &[String]) -> Result<Value, FunctionError>
            + Send
            + Sync
            + 'static,
    {
        self.register(name, Arc::new(FnFunction(function)));
    }

    /// Whether a function is registered under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Invoke the function registered under `name`.
    ///
    /// Unknown names are `FunctionError::NotFound` — an unresolvable
    /// placeholder is the caller's configuration problem and is never
    /// rendered as empty text.
    pub async fn invoke(
        &self,
        name: &str,
        context: &RenderContext,
        memory: &dyn Memory,
        tokenizer: &dyn Tokenizer,
        args: &[String],
    ) -> Result<Value, FunctionError> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| FunctionError::NotFound(name.to_string()))?;
        function.invoke(context, memory, tokenizer, args).await
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("FunctionRegistry")
            .field("functions", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registry_tracks_registered_names() {
        let mut registry = FunctionRegistry::new();
        assert!(!registry.has("greet"));

        registry.register_fn("greet", |_ctx, _memory, args| {
            Ok(json!(format!("hello {}", args.join(" "))))
        });
        assert!(registry.has("greet"));
        assert!(!registry.has("other"));
    }

    #[test]
    fn register_replaces_previous_entry() {
        let mut registry = FunctionRegistry::new();
        registry.register_fn("greet", |_ctx, _memory, _args| Ok(json!("first")));
        registry.register_fn("greet", |_ctx, _memory, _args| Ok(json!("second")));
        assert!(registry.has("greet"));
        assert_eq!(format!("{registry:?}"), r#"FunctionRegistry { functions: ["greet"] }"#);
    }
}
