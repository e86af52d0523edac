//! Single-pass tokenizer for the directive language.

use super::ast::Span;
use super::error::{Location, TemplateError};
use crate::core::provider::Provider;

pub const OPEN: &str = "{{";
pub const CLOSE: &str = "}}";
pub const ESCAPED_OPEN: &str = "\\{{";
pub const RAW_OPEN: &str = "{{{{raw}}}}";
pub const RAW_CLOSE: &str = "{{{{/raw}}}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    If,
    Unless,
    Each,
    Provider,
}

impl BlockKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Unless => "unless",
            Self::Each => "each",
            Self::Provider => "provider",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "if" => Some(Self::If),
            "unless" => Some(Self::Unless),
            "each" => Some(Self::Each),
            "provider" => Some(Self::Provider),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Variable(Vec<String>),
    Open(BlockKind, Vec<String>),
    OpenProvider(Vec<Provider>),
    Else,
    Close(BlockKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text(Span),
    /// The literal `{{` following a backslash.
    Escaped(Span),
    /// Contents between raw markers.
    Raw(Span),
    /// A `{{ … }}` directive; the span covers the whole tag.
    Tag(Tag, Span),
}

pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, TemplateError> {
        let mut tokens = Vec::new();
        while self.pos < self.source.len() {
            tokens.push(self.next_token()?);
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, TemplateError> {
        let start = self.pos;
        let rest = &self.source[start..];

        // An escaped raw marker stays whole instead of becoming `{{` + `{{raw}}`.
        if rest.starts_with(ESCAPED_OPEN) {
            let marker = [RAW_OPEN, RAW_CLOSE]
                .into_iter()
                .find(|marker| rest[1..].starts_with(*marker))
                .unwrap_or(OPEN);
            self.pos += 1 + marker.len();
            return Ok(Token::Escaped(start + 1..self.pos));
        }

        if rest.starts_with(RAW_OPEN) {
            let body_start = start + RAW_OPEN.len();
            let Some(offset) = self.source[body_start..].find(RAW_CLOSE) else {
                return Err(self.syntax_error(start, "unterminated raw block, expected {{{{/raw}}}}"));
            };
            let body_end = body_start + offset;
            self.pos = body_end + RAW_CLOSE.len();
            return Ok(Token::Raw(body_start..body_end));
        }

        if rest.starts_with(OPEN) {
            let inner_start = start + OPEN.len();
            let Some(offset) = self.source[inner_start..].find(CLOSE) else {
                return Err(self.syntax_error(start, "unterminated tag, expected `}}`"));
            };
            let inner_end = inner_start + offset;
            self.pos = inner_end + CLOSE.len();
            let tag = self.classify(&self.source[inner_start..inner_end], start)?;
            return Ok(Token::Tag(tag, start..self.pos));
        }

        let len = rest.find(OPEN).map_or(rest.len(), |offset| {
            if offset > 0 && rest.as_bytes()[offset - 1] == b'\\' {
                offset - 1
            } else {
                offset
            }
        });
        self.pos += len;
        Ok(Token::Text(start..self.pos))
    }

    fn classify(&self, raw: &str, at: usize) -> Result<Tag, TemplateError> {
        let inner = raw.trim();
        if inner.is_empty() {
            return Err(self.syntax_error(at, "empty tag `{{}}`"));
        }

        if let Some(block) = inner.strip_prefix('#') {
            let (helper, arg) = block
                .split_once(char::is_whitespace)
                .map_or((block, ""), |(h, a)| (h, a.trim()));
            let Some(kind) = BlockKind::from_name(helper) else {
                return Err(self.syntax_error(at, &format!("unknown block helper `#{helper}`")));
            };
            if arg.is_empty() {
                return Err(self.syntax_error(
                    at,
                    &format!("`{{{{#{helper}}}}}` requires an argument"),
                ));
            }
            if kind == BlockKind::Provider {
                return self.provider_list(arg, at).map(Tag::OpenProvider);
            }
            if arg.contains(char::is_whitespace) {
                return Err(self.syntax_error(
                    at,
                    &format!("`{{{{#{helper}}}}}` expects a single path, found `{arg}`"),
                ));
            }
            return self.path(arg, at).map(|path| Tag::Open(kind, path));
        }

        if let Some(name) = inner.strip_prefix('/') {
            let name = name.trim();
            return BlockKind::from_name(name)
                .map(Tag::Close)
                .ok_or_else(|| self.syntax_error(at, &format!("unknown closing tag `/{name}`")));
        }

        if inner == "else" {
            return Ok(Tag::Else);
        }

        self.path(inner, at).map(Tag::Variable)
    }

    fn path(&self, text: &str, at: usize) -> Result<Vec<String>, TemplateError> {
        let segments: Vec<String> = text.split('.').map(str::to_string).collect();
        for segment in &segments {
            if !is_valid_segment(segment) {
                return Err(self.syntax_error(at, &format!("invalid variable path `{text}`")));
            }
        }
        Ok(segments)
    }

    fn provider_list(&self, text: &str, at: usize) -> Result<Vec<Provider>, TemplateError> {
        let mut providers = Vec::new();
        for name in text.split(',').map(str::trim) {
            if name.is_empty() {
                continue;
            }
            let provider = name.parse::<Provider>().map_err(|_| {
                self.syntax_error(at, &format!("unknown provider `{name}` in `{{{{#provider}}}}`"))
            })?;
            if !providers.contains(&provider) {
                providers.push(provider);
            }
        }
        if providers.is_empty() {
            return Err(self.syntax_error(at, "`{{#provider}}` requires at least one provider"));
        }
        Ok(providers)
    }

    fn syntax_error(&self, at: usize, message: &str) -> TemplateError {
        TemplateError::Syntax {
            message: message.to_string(),
            location: Location::of(self.source, at),
        }
    }
}

fn is_valid_segment(segment: &str) -> bool {
    let body = segment.strip_prefix('@').unwrap_or(segment);
    !body.is_empty()
        && body
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}
