use std::fmt;

use thiserror::Error;

/// 1-indexed position in template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Compute the line/column of a byte offset.
    #[must_use]
    pub fn of(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("{location}: {message}")]
    Syntax { message: String, location: Location },

    #[error("{location}: {message}")]
    Render { message: String, location: Location },
}

impl TemplateError {
    #[must_use]
    pub const fn location(&self) -> Location {
        match self {
            Self::Syntax { location, .. } | Self::Render { location, .. } => *location,
        }
    }
}
