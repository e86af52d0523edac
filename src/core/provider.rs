//! Target providers and their output capabilities.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkillError};

/// A downstream agent runtime that compiled skills are emitted for.
///
/// Variant order is the fixed compilation order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    #[serde(rename = "openclaw")]
    OpenClaw,
    ClaudeCode,
    Codex,
}

/// How a provider wants its `SKILL.md` frontmatter laid out.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FrontmatterShape {
    /// Flat core keys plus a nested `metadata.<provider>:` block.
    FlatWithNestedMetadata,
    /// Core keys and provider fields, all at the top level.
    Flat,
    /// Exactly `name`, `description`, `version`.
    Minimal,
}

/// Static per-provider capability table.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    pub frontmatter: FrontmatterShape,
    /// Path segments between the provider directory and `<name>/`.
    pub path_prefix: &'static [&'static str],
    /// Whether an `agents/openai.yaml` descriptor is emitted.
    pub agent_descriptor: bool,
}

impl Provider {
    pub const ALL: [Self; 3] = [Self::OpenClaw, Self::ClaudeCode, Self::Codex];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenClaw => "openclaw",
            Self::ClaudeCode => "claude-code",
            Self::Codex => "codex",
        }
    }

    #[must_use]
    pub const fn capabilities(self) -> Capabilities {
        match self {
            Self::OpenClaw => Capabilities {
                frontmatter: FrontmatterShape::FlatWithNestedMetadata,
                path_prefix: &[],
                agent_descriptor: false,
            },
            Self::ClaudeCode => Capabilities {
                frontmatter: FrontmatterShape::Flat,
                path_prefix: &[],
                agent_descriptor: false,
            },
            Self::Codex => Capabilities {
                frontmatter: FrontmatterShape::Minimal,
                path_prefix: &[".agents", "skills"],
                agent_descriptor: true,
            },
        }
    }

    /// Skill directory relative to the output root, e.g. `codex/.agents/skills/<name>`.
    #[must_use]
    pub fn skill_dir(self, skill_name: &str) -> PathBuf {
        let mut dir = PathBuf::from(self.as_str());
        for segment in self.capabilities().path_prefix {
            dir.push(segment);
        }
        dir.push(skill_name);
        dir
    }

    /// Parse a comma-separated provider list, rejecting unknown names.
    pub fn parse_list(input: &str) -> Result<Vec<Self>> {
        input
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromStr for Provider {
    type Err = SkillError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "openclaw" => Ok(Self::OpenClaw),
            "claude-code" => Ok(Self::ClaudeCode),
            "codex" => Ok(Self::Codex),
            other => Err(SkillError::UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
