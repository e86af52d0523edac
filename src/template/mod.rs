//! Instruction template engine.
//!
//! A deliberately small, closed directive language:
//!
//! | Syntax | Meaning |
//! |---|---|
//! | `{{path.to.value}}` | interpolate a value; undefined paths are an error |
//! | `{{#if p}}…{{else}}…{{/if}}` | render when `p` is truthy |
//! | `{{#unless p}}…{{else}}…{{/unless}}` | render when `p` is falsy |
//! | `{{#each p}}…{{/each}}` | render once per element of sequence `p` |
//! | `{{#provider a,b}}…{{/provider}}` | render only for the listed providers |
//! | `{{{{raw}}}}…{{{{/raw}}}}` | copy contents verbatim |
//! | `\{{` | a literal `{{` |
//! | `\{{{{raw}}}}`, `\{{{{/raw}}}}` | a literal raw marker |
//!
//! Templates are parsed once and rendered any number of times; rendering never
//! mutates the tree.
//!
//! ```
//! use skill_universe::core::provider::Provider;
//! use skill_universe::template::{RenderContext, Template, Value};
//!
//! let template = Template::parse("{{name}}{{#provider codex}} (codex){{/provider}}").unwrap();
//! let root: Value = [("name", Value::from("demo"))].into_iter().collect();
//! let ctx = RenderContext::new(root, Provider::Codex);
//! assert_eq!(template.render(&ctx).unwrap(), "demo (codex)");
//! ```

pub mod ast;
mod error;
pub mod lexer;
pub mod parser;
mod render;
mod value;

pub use ast::{Node, Span, VarPath};
pub use error::{Location, TemplateError};
pub use render::RenderContext;
pub use value::Value;

use parser::Parser;
use render::Renderer;

/// A parsed template that owns its source buffer.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    nodes: Vec<Node>,
}

impl Template {
    pub fn parse(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        let nodes = Parser::parse(&source)?;
        Ok(Self { source, nodes })
    }

    pub fn render(&self, ctx: &RenderContext) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len());
        Renderer::new(&self.source, ctx).render(&self.nodes, &mut out)?;
        Ok(out)
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}
