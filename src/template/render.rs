//! Tree-walking renderer.

use std::borrow::Cow;

use super::ast::{Node, VarPath};
use super::error::{Location, TemplateError};
use super::value::Value;
use crate::core::package::format_float;
use crate::core::provider::Provider;

/// Variable bindings plus the provider being rendered for.
#[derive(Debug, Clone)]
pub struct RenderContext {
    root: Value,
    provider: Provider,
}

impl RenderContext {
    #[must_use]
    pub const fn new(root: Value, provider: Provider) -> Self {
        Self { root, provider }
    }

    #[must_use]
    pub const fn provider(&self) -> Provider {
        self.provider
    }

    #[must_use]
    pub const fn root(&self) -> &Value {
        &self.root
    }
}

/// Loop-local scope.
struct Frame<'v> {
    item: &'v Value,
    index: usize,
    len: usize,
}

pub(super) struct Renderer<'s, 'v> {
    source: &'s str,
    ctx: &'v RenderContext,
    frames: Vec<Frame<'v>>,
}

impl<'s, 'v> Renderer<'s, 'v> {
    pub(super) const fn new(source: &'s str, ctx: &'v RenderContext) -> Self {
        Self {
            source,
            ctx,
            frames: Vec::new(),
        }
    }

    pub(super) fn render(&mut self, nodes: &[Node], out: &mut String) -> Result<(), TemplateError> {
        for node in nodes {
            match node {
                Node::Literal(span) | Node::Raw(span) | Node::EscapedBrace(span) => {
                    out.push_str(&self.source[span.clone()]);
                }
                Node::Variable(path) => self.interpolate(path, out)?,
                Node::If {
                    condition,
                    body,
                    else_body,
                } => {
                    let branch = if self.truthy(condition) {
                        Some(body)
                    } else {
                        else_body.as_ref()
                    };
                    if let Some(branch) = branch {
                        self.render(branch, out)?;
                    }
                }
                Node::Unless {
                    condition,
                    body,
                    else_body,
                } => {
                    let branch = if self.truthy(condition) {
                        else_body.as_ref()
                    } else {
                        Some(body)
                    };
                    if let Some(branch) = branch {
                        self.render(branch, out)?;
                    }
                }
                Node::Each { collection, body } => self.each(collection, body, out)?,
                Node::Provider { providers, body } => {
                    if providers.contains(&self.ctx.provider) {
                        self.render(body, out)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn interpolate(&self, path: &VarPath, out: &mut String) -> Result<(), TemplateError> {
        let Some(value) = self.lookup(path) else {
            return Err(self.error(path, &format!("undefined variable `{}`", path.dotted())));
        };
        match value.as_ref() {
            Value::Null => {}
            Value::Bool(b) => out.push_str(&b.to_string()),
            Value::Int(i) => out.push_str(&i.to_string()),
            Value::Float(f) => out.push_str(&format_float(*f)),
            Value::String(s) => out.push_str(s),
            other => {
                return Err(self.error(
                    path,
                    &format!("cannot interpolate {} `{}`", other.kind(), path.dotted()),
                ));
            }
        }
        Ok(())
    }

    fn each(&mut self, path: &VarPath, body: &[Node], out: &mut String) -> Result<(), TemplateError> {
        let items: &'v [Value] = match self.lookup(path) {
            None | Some(Cow::Borrowed(Value::Null)) => return Ok(()),
            Some(Cow::Borrowed(Value::List(items))) => items,
            Some(other) => {
                return Err(self.error(
                    path,
                    &format!(
                        "`{{{{#each {}}}}}` expects a sequence, found {}",
                        path.dotted(),
                        other.kind()
                    ),
                ));
            }
        };
        let len = items.len();
        for (index, item) in items.iter().enumerate() {
            self.frames.push(Frame { item, index, len });
            let result = self.render(body, out);
            self.frames.pop();
            result?;
        }
        Ok(())
    }

    fn truthy(&self, path: &VarPath) -> bool {
        self.lookup(path).is_some_and(|value| value.is_truthy())
    }

    /// Resolve a path against loop frames (innermost first), then the root.
    fn lookup(&self, path: &VarPath) -> Option<Cow<'v, Value>> {
        let (first, rest) = path.segments.split_first()?;
        let frame = self.frames.last();
        let mut current: Cow<'v, Value> = match first.as_str() {
            "this" => Cow::Borrowed(frame.map_or(&self.ctx.root, |f| f.item)),
            "@index" => Cow::Owned(Value::Int(i64::try_from(frame?.index).ok()?)),
            "@first" => Cow::Owned(Value::Bool(frame?.index == 0)),
            "@last" => {
                let frame = frame?;
                Cow::Owned(Value::Bool(frame.index + 1 == frame.len))
            }
            name => Cow::Borrowed(
                self.frames
                    .iter()
                    .rev()
                    .find_map(|f| f.item.get(name))
                    .or_else(|| self.ctx.root.get(name))?,
            ),
        };
        for segment in rest {
            current = match current {
                Cow::Borrowed(value) => Cow::Borrowed(value.get(segment)?),
                Cow::Owned(value) => Cow::Owned(value.get(segment)?.clone()),
            };
        }
        Some(current)
    }

    fn error(&self, path: &VarPath, message: &str) -> TemplateError {
        TemplateError::Render {
            message: message.to_string(),
            location: Location::of(self.source, path.span.start),
        }
    }
}
