//! Recursive-descent parser from tokens to [`Node`]s.

use std::iter::Peekable;
use std::vec::IntoIter;

use super::ast::{Node, Span, VarPath};
use super::error::{Location, TemplateError};
use super::lexer::{BlockKind, Lexer, Tag, Token};

/// What stopped a sequence of nodes.
enum Terminator {
    Eof,
    Else(Span),
    Close(BlockKind, Span),
}

pub struct Parser<'a> {
    source: &'a str,
    tokens: Peekable<IntoIter<Token>>,
}

impl<'a> Parser<'a> {
    pub fn parse(source: &'a str) -> Result<Vec<Node>, TemplateError> {
        let tokens = Lexer::new(source).tokenize()?;
        let mut parser = Self {
            source,
            tokens: tokens.into_iter().peekable(),
        };
        let (nodes, terminator) = parser.sequence()?;
        match terminator {
            Terminator::Eof => Ok(nodes),
            Terminator::Else(span) => Err(parser.error(&span, "`{{else}}` outside of an if/unless block")),
            Terminator::Close(kind, span) => Err(parser.error(
                &span,
                &format!("unmatched `{{{{/{}}}}}`", kind.name()),
            )),
        }
    }

    fn sequence(&mut self) -> Result<(Vec<Node>, Terminator), TemplateError> {
        let mut nodes = Vec::new();
        while let Some(token) = self.tokens.next() {
            match token {
                Token::Text(span) => nodes.push(Node::Literal(span)),
                Token::Escaped(span) => nodes.push(Node::EscapedBrace(span)),
                Token::Raw(span) => nodes.push(Node::Raw(span)),
                Token::Tag(Tag::Variable(segments), span) => {
                    nodes.push(Node::Variable(VarPath { segments, span }));
                }
                Token::Tag(Tag::Else, span) => return Ok((nodes, Terminator::Else(span))),
                Token::Tag(Tag::Close(kind), span) => {
                    return Ok((nodes, Terminator::Close(kind, span)));
                }
                Token::Tag(Tag::Open(kind, segments), span) => {
                    let path = VarPath {
                        segments,
                        span: span.clone(),
                    };
                    nodes.push(self.block(kind, path, &span)?);
                }
                Token::Tag(Tag::OpenProvider(providers), span) => {
                    let body = self.body(BlockKind::Provider, &span, false)?.0;
                    nodes.push(Node::Provider { providers, body });
                }
            }
        }
        Ok((nodes, Terminator::Eof))
    }

    fn block(&mut self, kind: BlockKind, path: VarPath, open: &Span) -> Result<Node, TemplateError> {
        match kind {
            BlockKind::If => {
                let (body, else_body) = self.body(kind, open, true)?;
                Ok(Node::If {
                    condition: path,
                    body,
                    else_body,
                })
            }
            BlockKind::Unless => {
                let (body, else_body) = self.body(kind, open, true)?;
                Ok(Node::Unless {
                    condition: path,
                    body,
                    else_body,
                })
            }
            BlockKind::Each => {
                let body = self.body(kind, open, false)?.0;
                Ok(Node::Each {
                    collection: path,
                    body,
                })
            }
            BlockKind::Provider => unreachable!("provider blocks carry a provider list"),
        }
    }

    /// Parse a block body up to its matching close tag.
    fn body(
        &mut self,
        kind: BlockKind,
        open: &Span,
        allow_else: bool,
    ) -> Result<(Vec<Node>, Option<Vec<Node>>), TemplateError> {
        let (body, terminator) = self.sequence()?;
        match terminator {
            Terminator::Close(closed, span) => {
                self.expect_match(kind, closed, &span, open)?;
                Ok((body, None))
            }
            Terminator::Else(_) if allow_else => {
                let (else_body, after_else) = self.sequence()?;
                match after_else {
                    Terminator::Close(closed, close_span) => {
                        self.expect_match(kind, closed, &close_span, open)?;
                        Ok((body, Some(else_body)))
                    }
                    Terminator::Else(second) => Err(self.error(
                        &second,
                        &format!("duplicate `{{{{else}}}}` in `{{{{#{}}}}}` block", kind.name()),
                    )),
                    Terminator::Eof => Err(self.unclosed(kind, open)),
                }
            }
            Terminator::Else(span) => Err(self.error(
                &span,
                &format!("`{{{{else}}}}` is not allowed inside `{{{{#{}}}}}`", kind.name()),
            )),
            Terminator::Eof => Err(self.unclosed(kind, open)),
        }
    }

    fn expect_match(
        &self,
        expected: BlockKind,
        found: BlockKind,
        close: &Span,
        open: &Span,
    ) -> Result<(), TemplateError> {
        if expected == found {
            return Ok(());
        }
        let opened_at = Location::of(self.source, open.start);
        Err(self.error(
            close,
            &format!(
                "mismatched `{{{{/{}}}}}`, expected `{{{{/{}}}}}` for block opened at {opened_at}",
                found.name(),
                expected.name()
            ),
        ))
    }

    fn unclosed(&self, kind: BlockKind, open: &Span) -> TemplateError {
        self.error(
            open,
            &format!("unclosed `{{{{#{}}}}}` block", kind.name()),
        )
    }

    fn error(&self, span: &Span, message: &str) -> TemplateError {
        TemplateError::Syntax {
            message: message.to_string(),
            location: Location::of(self.source, span.start),
        }
    }
}
