//! Error types for skill-universe.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::template::TemplateError;

#[derive(Debug, Error)]
pub enum SkillError {
    #[error("parse error in {}: {message}", file.display())]
    Parse { file: PathBuf, message: String },

    #[error("validation failed for `{field}`: {message}")]
    Validation { field: String, message: String },

    #[error("INSTRUCTIONS.md not found at {}", .0.display())]
    MissingInstructions(PathBuf),

    #[error("unknown provider `{0}` (expected one of: openclaw, claude-code, codex)")]
    UnknownProvider(String),

    #[error("render error in {}: {message}", file.display())]
    Render { file: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error at {}: {source}", path.display())]
    PathIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SkillError>;

impl SkillError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn io_at(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::PathIo {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Attach the originating file to a template failure.
    pub fn from_template(file: impl AsRef<Path>, err: TemplateError) -> Self {
        let file = file.as_ref().to_path_buf();
        match err {
            TemplateError::Syntax { .. } => Self::Parse {
                file,
                message: err.to_string(),
            },
            TemplateError::Render { .. } => Self::Render {
                file,
                message: err.to_string(),
            },
        }
    }

    /// Stable machine-readable code used by robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "parse_error",
            Self::Validation { .. } => "validation_error",
            Self::MissingInstructions(_) => "missing_instructions",
            Self::UnknownProvider(_) => "unknown_provider",
            Self::Render { .. } => "render_error",
            Self::Io(_) | Self::PathIo { .. } => "io_error",
            Self::Config(_) => "config_error",
        }
    }
}
