//! Template sections — text resolved per render from memory and functions.
//!
//! Template syntax:
//! - `{{$scope.property}}` — a memory variable; missing values render empty
//! - `{{name arg1 arg2}}` — a prompt function call; resolution failures
//!   and unknown names propagate as errors
//! - everything else — literal text
//!
//! Templates parse at construction, so malformed blocks fail fast instead
//! of surfacing mid-render.

use crate::base::{self, SectionProps};
use async_trait::async_trait;
use promptmason_core::budget::TokenBudget;
use promptmason_core::context::RenderContext;
use promptmason_core::error::{Error, Result};
use promptmason_core::functions::FunctionRegistry;
use promptmason_core::memory::{Memory, MemoryPath};
use promptmason_core::message::Message;
use promptmason_core::section::{PromptSection, RenderedSection};
use promptmason_core::tokenizer::Tokenizer;
use promptmason_core::value::value_to_string;

/// One parsed segment of a template.
#[derive(Debug, Clone, PartialEq)]
enum TemplatePart {
    Text(String),
    Variable(String),
    Function { name: String, args: Vec<String> },
}

/// A leaf section whose content is a template resolved at render time.
///
/// After resolution the content follows the same budget rules as a
/// static text section: fixed budgets truncate, everything else renders
/// in full and flags overflow.
#[derive(Debug, Clone)]
pub struct TemplateSection {
    parts: Vec<TemplatePart>,
    role: String,
    props: SectionProps,
}

impl TemplateSection {
    /// Parse `template`. Unclosed or empty `{{ }}` blocks and malformed
    /// variable paths are configuration errors.
    pub fn new(template: impl AsRef<str>, role: impl Into<String>) -> Result<Self> {
        Ok(Self {
            parts: parse(template.as_ref())?,
            role: role.into(),
            props: SectionProps::default(),
        })
    }

    /// Set the token budget.
    pub fn with_tokens(mut self, tokens: TokenBudget) -> Self {
        self.props.tokens = tokens;
        self
    }

    /// Mark the section droppable when the prompt runs over budget.
    pub fn optional(mut self) -> Self {
        self.props.required = false;
        self
    }

    /// Set the string prepended when flattening to text.
    pub fn with_text_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.props.text_prefix = prefix.into();
        self
    }

    async fn resolve(
        &self,
        context: &RenderContext,
        memory: &dyn Memory,
        functions: &FunctionRegistry,
        tokenizer: &dyn Tokenizer,
    ) -> Result<String> {
        let mut content = String::new();
        for part in &self.parts {
            match part {
                TemplatePart::Text(text) => content.push_str(text),
                TemplatePart::Variable(path) => {
                    if let Some(value) = memory.get_value(path)? {
                        content.push_str(&value_to_string(&value));
                    }
                }
                TemplatePart::Function { name, args } => {
                    let value = functions
                        .invoke(name, context, memory, tokenizer, args)
                        .await?;
                    content.push_str(&value_to_string(&value));
                }
            }
        }
        Ok(content)
    }
}

fn parse(template: &str) -> Result<Vec<TemplatePart>> {
    let mut parts = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        if start > 0 {
            parts.push(TemplatePart::Text(rest[..start].to_string()));
        }
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| Error::config(format!("unclosed template block in {template:?}")))?;
        let inner = after[..end].trim();

        if inner.is_empty() {
            return Err(Error::config(format!("empty template block in {template:?}")));
        }
        if let Some(path) = inner.strip_prefix('$') {
            let parsed = MemoryPath::parse(path)?;
            parts.push(TemplatePart::Variable(parsed.to_string()));
        } else {
            let mut words = inner.split_whitespace();
            let name = words.next().unwrap_or_default().to_string();
            let args = words.map(str::to_string).collect();
            parts.push(TemplatePart::Function { name, args });
        }
        rest = &after[end + 2..];
    }
    if !rest.is_empty() {
        parts.push(TemplatePart::Text(rest.to_string()));
    }
    Ok(parts)
}

#[async_trait]
impl PromptSection for TemplateSection {
    fn tokens(&self) -> TokenBudget {
        self.props.tokens
    }

    fn required(&self) -> bool {
        self.props.required
    }

    async fn render_as_text(
        &self,
        context: &RenderContext,
        memory: &dyn Memory,
        functions: &FunctionRegistry,
        tokenizer: &dyn Tokenizer,
        max_tokens: usize,
    ) -> Result<RenderedSection<String>> {
        let content = self.resolve(context, memory, functions, tokenizer).await?;
        let clipped = base::clip_to_budget(self.props.tokens, &content, tokenizer, max_tokens)?;
        base::text_result(&self.props, clipped, tokenizer)
    }

    async fn render_as_messages(
        &self,
        context: &RenderContext,
        memory: &dyn Memory,
        functions: &FunctionRegistry,
        tokenizer: &dyn Tokenizer,
        max_tokens: usize,
    ) -> Result<RenderedSection<Vec<Message>>> {
        let content = self.resolve(context, memory, functions, tokenizer).await?;
        let clipped = base::clip_to_budget(self.props.tokens, &content, tokenizer, max_tokens)?;
        Ok(base::message_result(&self.role, clipped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptmason_core::error::FunctionError;
    use promptmason_core::memory::Memory;
    use promptmason_memory::VolatileMemory;
    use promptmason_tokenizers::CharTokenizer;
    use serde_json::json;

    async fn render(
        section: &TemplateSection,
        memory: &dyn Memory,
        functions: &FunctionRegistry,
    ) -> Result<RenderedSection<String>> {
        section
            .render_as_text(&RenderContext::default(), memory, functions, &CharTokenizer, 100)
            .await
    }

    #[test]
    fn parses_literals_variables_and_functions() {
        let section =
            TemplateSection::new("Hello {{$user.name}}, today is {{today short}}.", "system")
                .unwrap();
        assert_eq!(section.parts.len(), 5);
        assert_eq!(section.parts[1], TemplatePart::Variable("user.name".into()));
        assert_eq!(
            section.parts[3],
            TemplatePart::Function {
                name: "today".into(),
                args: vec!["short".into()],
            }
        );
    }

    #[test]
    fn unclosed_block_fails_at_construction() {
        let err = TemplateSection::new("Hello {{$user.name", "system").unwrap_err();
        assert!(err.to_string().contains("unclosed"));
    }

    #[test]
    fn empty_block_fails_at_construction() {
        assert!(TemplateSection::new("Hello {{ }}", "system").is_err());
    }

    #[test]
    fn malformed_variable_path_fails_at_construction() {
        assert!(TemplateSection::new("{{$a.b.c}}", "system").is_err());
    }

    #[tokio::test]
    async fn resolves_memory_variables() {
        let memory = VolatileMemory::new();
        memory.set_value("user.name", json!("Alice")).unwrap();

        let section = TemplateSection::new("Hello {{$user.name}}!", "system").unwrap();
        let rendered = render(&section, &memory, &FunctionRegistry::new()).await.unwrap();
        assert_eq!(rendered.output, "Hello Alice!");
        assert_eq!(rendered.length, 12);
    }

    #[tokio::test]
    async fn bare_variable_reads_temp_scope() {
        let memory = VolatileMemory::new();
        memory.set_value("temp.input", json!("what now?")).unwrap();

        let section = TemplateSection::new("{{$input}}", "user").unwrap();
        let rendered = render(&section, &memory, &FunctionRegistry::new()).await.unwrap();
        assert_eq!(rendered.output, "what now?");
    }

    #[tokio::test]
    async fn missing_variable_renders_empty() {
        let section = TemplateSection::new("[{{$user.name}}]", "system").unwrap();
        let rendered = render(&section, &VolatileMemory::new(), &FunctionRegistry::new())
            .await
            .unwrap();
        assert_eq!(rendered.output, "[]");
    }

    #[tokio::test]
    async fn invokes_registered_functions_with_args() {
        let mut functions = FunctionRegistry::new();
        functions.register_fn("greet", |_ctx, _memory, args| {
            Ok(json!(format!("hello {}", args.join(" "))))
        });

        let section = TemplateSection::new("{{greet big world}}", "system").unwrap();
        let rendered = render(&section, &VolatileMemory::new(), &functions).await.unwrap();
        assert_eq!(rendered.output, "hello big world");
    }

    #[tokio::test]
    async fn unknown_function_propagates_error() {
        let section = TemplateSection::new("{{nope}}", "system").unwrap();
        let err = render(&section, &VolatileMemory::new(), &FunctionRegistry::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Function(FunctionError::NotFound(name)) if name == "nope"
        ));
    }

    #[tokio::test]
    async fn function_failure_propagates_unchanged() {
        let mut functions = FunctionRegistry::new();
        functions.register_fn("flaky", |_ctx, _memory, _args| {
            Err(FunctionError::Failed {
                name: "flaky".into(),
                reason: "upstream offline".into(),
            })
        });

        let section = TemplateSection::new("{{flaky}}", "system").unwrap();
        let err = render(&section, &VolatileMemory::new(), &functions).await.unwrap_err();
        assert!(err.to_string().contains("upstream offline"));
    }

    #[tokio::test]
    async fn resolved_content_respects_fixed_budget() {
        let memory = VolatileMemory::new();
        memory.set_value("temp.blob", json!("0123456789")).unwrap();

        let section = TemplateSection::new("{{$blob}}", "user")
            .unwrap()
            .with_tokens(TokenBudget::fixed(4));
        let rendered = render(&section, &memory, &FunctionRegistry::new()).await.unwrap();
        assert_eq!(rendered.output, "0123");
        assert_eq!(rendered.length, 4);
        assert!(rendered.too_long);
    }

    #[tokio::test]
    async fn structured_values_render_as_json() {
        let memory = VolatileMemory::new();
        memory.set_value("user.profile", json!({"tier": 2})).unwrap();

        let section = TemplateSection::new("{{$user.profile}}", "system").unwrap();
        let rendered = render(&section, &memory, &FunctionRegistry::new()).await.unwrap();
        assert_eq!(rendered.output, r#"{"tier":2}"#);
    }
}
