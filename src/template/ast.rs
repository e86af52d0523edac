//! Template syntax tree.
//!
//! Nodes hold byte spans into the owning [`Template`](super::Template)'s
//! source buffer instead of copying text.

use std::ops::Range;

use crate::core::provider::Provider;

pub type Span = Range<usize>;

/// A dotted lookup path such as `meta.emoji`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarPath {
    pub segments: Vec<String>,
    /// Location of the enclosing tag, for error reporting.
    pub span: Span,
}

impl VarPath {
    #[must_use]
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Literal(Span),
    Variable(VarPath),
    If {
        condition: VarPath,
        body: Vec<Node>,
        else_body: Option<Vec<Node>>,
    },
    Unless {
        condition: VarPath,
        body: Vec<Node>,
        else_body: Option<Vec<Node>>,
    },
    Each {
        collection: VarPath,
        body: Vec<Node>,
    },
    Provider {
        providers: Vec<Provider>,
        body: Vec<Node>,
    },
    Raw(Span),
    EscapedBrace(Span),
}
