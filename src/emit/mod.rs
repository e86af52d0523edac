//! Provider emitters.
//!
//! Each emitter is a pure function from a [`ResolvedRecord`] to an
//! [`OutputBundle`]; nothing here touches the filesystem. Dispatch goes
//! through the provider capability table.

mod claude_code;
mod codex;
mod openclaw;

use std::path::PathBuf;

use serde::Serialize;
use serde_yaml::{Mapping, Value as YamlValue};
use tracing::debug;

use crate::core::package::{Metadata, ScalarMap};
use crate::core::provider::{FrontmatterShape, Provider};
use crate::core::resolver::ResolvedRecord;
use crate::error::{Result, SkillError};

pub const SKILL_FILE: &str = "SKILL.md";
pub const AGENT_DESCRIPTOR_FILE: &str = "agents/openai.yaml";
pub const SCRIPTS_DIR: &str = "scripts";

/// Files staged for one provider, relative to its skill directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBundle {
    pub provider: Provider,
    /// Skill directory relative to the output root.
    pub dir: PathBuf,
    pub files: Vec<(PathBuf, Vec<u8>)>,
}

impl OutputBundle {
    #[must_use]
    pub fn file(&self, relative: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .find(|(path, _)| path.as_path() == std::path::Path::new(relative))
            .map(|(_, bytes)| bytes.as_slice())
    }
}

/// Emit the output bundle for `record.provider`.
pub fn emit(record: &ResolvedRecord) -> Result<OutputBundle> {
    let capabilities = record.provider.capabilities();
    let frontmatter = match capabilities.frontmatter {
        FrontmatterShape::FlatWithNestedMetadata => openclaw::frontmatter(&record.metadata),
        FrontmatterShape::Flat => claude_code::frontmatter(&record.metadata),
        FrontmatterShape::Minimal => codex::frontmatter(&record.metadata),
    };

    let mut files = vec![(
        PathBuf::from(SKILL_FILE),
        render_skill_md(&frontmatter, &record.body)?.into_bytes(),
    )];
    if capabilities.agent_descriptor {
        let descriptor = codex::agent_descriptor(&record.metadata);
        files.push((
            PathBuf::from(AGENT_DESCRIPTOR_FILE),
            to_yaml(&descriptor, AGENT_DESCRIPTOR_FILE)?.into_bytes(),
        ));
    }
    for (name, content) in &record.scripts {
        files.push((PathBuf::from(SCRIPTS_DIR).join(name), content.clone()));
    }

    debug!(
        provider = %record.provider,
        dir = %record.dir.display(),
        files = files.len(),
        "emitted provider bundle"
    );

    Ok(OutputBundle {
        provider: record.provider,
        dir: record.dir.clone(),
        files,
    })
}

/// `---` fenced YAML frontmatter, a blank line, then the body ending in
/// exactly one newline.
pub fn render_skill_md(frontmatter: &Mapping, body: &str) -> Result<String> {
    let yaml = to_yaml(frontmatter, SKILL_FILE)?;
    let body = body.trim_end_matches(['\n', '\r']);
    Ok(format!("---\n{yaml}---\n\n{body}\n"))
}

/// `name`, `description`, `version`, then `license`/`homepage` when asked
/// for and present.
fn core_fields(metadata: &Metadata, with_optional: bool) -> Mapping {
    let mut fields = Mapping::new();
    insert_str(&mut fields, "name", &metadata.name);
    insert_str(&mut fields, "description", &metadata.description);
    insert_str(&mut fields, "version", &metadata.version);
    if with_optional {
        if let Some(license) = &metadata.license {
            insert_str(&mut fields, "license", license);
        }
        if let Some(homepage) = &metadata.homepage {
            insert_str(&mut fields, "homepage", homepage);
        }
    }
    fields
}

fn insert_str(mapping: &mut Mapping, key: &str, value: &str) {
    mapping.insert(
        YamlValue::String(key.to_string()),
        YamlValue::String(value.to_string()),
    );
}

fn extend_scalars(mapping: &mut Mapping, entries: &ScalarMap) {
    for (key, value) in entries.iter() {
        mapping.insert(YamlValue::String(key.to_string()), value.to_yaml());
    }
}

fn to_yaml(value: &impl Serialize, file: &str) -> Result<String> {
    serde_yaml::to_string(value).map_err(|err| SkillError::Render {
        file: PathBuf::from(file),
        message: format!("YAML serialize error: {err}"),
    })
}
