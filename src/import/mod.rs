//! Import an existing provider `SKILL.md` as a skill package.
//!
//! The frontmatter becomes `skill.yaml`; keys that are not universal fields
//! become overrides for the provider the skill came from. The markdown body
//! becomes `INSTRUCTIONS.md` with every `{{` escaped, so compiling the package
//! for that provider reproduces the body verbatim. Scripts next to the
//! `SKILL.md` are copied into `scripts/`.

mod frontmatter;

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value as YamlValue};
use tracing::debug;

pub use frontmatter::split_frontmatter;

use crate::core::loader::{
    INSTRUCTIONS_FILE, MANIFEST_FILE, PROVIDER_METADATA_FILE, PROVIDERS_DIR, SCRIPTS_DIR,
    load_scripts,
};
use crate::core::package::{Scalar, ScalarMap, Scripts};
use crate::core::provider::Provider;
use crate::emit::SKILL_FILE;
use crate::error::{Result, SkillError};
use crate::utils::fs::{read_optional, write_file};

/// Version written when the source frontmatter has none.
pub const DEFAULT_VERSION: &str = "0.1.0";

const UNIVERSAL_KEYS: [&str; 5] = ["name", "version", "description", "license", "homepage"];

/// A skill read back from provider output, ready to be written as a package.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedSkill {
    pub name: String,
    pub version: String,
    pub description: String,
    pub license: Option<String>,
    pub homepage: Option<String>,
    pub meta: ScalarMap,
    /// Provider the overrides belong to, when known.
    pub provider: Option<Provider>,
    pub overrides: ScalarMap,
    pub instructions: String,
    pub scripts: Scripts,
    pub warnings: Vec<String>,
}

/// Read `source` (a `SKILL.md` file or a directory holding one).
///
/// `provider` names where the skill came from. Without it, a
/// `metadata.openclaw` block implies openclaw; otherwise provider-specific
/// keys are dropped with a warning.
pub fn read_skill(source: &Path, provider: Option<Provider>) -> Result<ImportedSkill> {
    let (file, dir) = if source.is_dir() {
        (source.join(SKILL_FILE), source.to_path_buf())
    } else {
        let dir = source.parent().map_or_else(PathBuf::new, Path::to_path_buf);
        (source.to_path_buf(), dir)
    };
    let content = read_optional(&file)?.ok_or_else(|| {
        SkillError::io_at(
            &file,
            std::io::Error::new(std::io::ErrorKind::NotFound, "SKILL.md not found"),
        )
    })?;

    let mut skill = parse_skill_md(&file, &content, provider)?;
    skill.scripts = load_scripts(&dir.join(SCRIPTS_DIR))?;
    debug!(
        file = %file.display(),
        scripts = skill.scripts.len(),
        "read skill for import"
    );
    Ok(skill)
}

/// Parse a `SKILL.md` document. `file` is used for error messages only.
pub fn parse_skill_md(
    file: &Path,
    content: &str,
    provider: Option<Provider>,
) -> Result<ImportedSkill> {
    let parse_error = |message: String| SkillError::Parse {
        file: file.to_path_buf(),
        message,
    };

    let (yaml, body) = split_frontmatter(content)
        .ok_or_else(|| parse_error("expected `---` fenced YAML frontmatter".to_string()))?;
    let mapping: Mapping = if yaml.trim().is_empty() {
        Mapping::new()
    } else {
        serde_yaml::from_str(yaml).map_err(|err| parse_error(format!("invalid YAML: {err}")))?
    };

    let mut fields = ScalarMap::new();
    let mut nested: Option<Mapping> = None;
    let mut warnings = Vec::new();
    for (key, value) in &mapping {
        let key = key
            .as_str()
            .ok_or_else(|| parse_error(format!("frontmatter keys must be strings, found {key:?}")))?;
        match value {
            YamlValue::Mapping(inner) if key == "metadata.openclaw" => {
                nested = Some(inner.clone());
            }
            YamlValue::Mapping(inner) if key == "metadata" => {
                match inner.get(Provider::OpenClaw.as_str()) {
                    Some(YamlValue::Mapping(claw)) => nested = Some(claw.clone()),
                    _ => warnings.push(format!("dropped non-scalar field `{key}`")),
                }
            }
            _ => match Scalar::from_yaml(value) {
                Some(scalar) => fields.insert(key, scalar),
                None => warnings.push(format!("dropped non-scalar field `{key}`")),
            },
        }
    }

    let provider = provider.or_else(|| nested.is_some().then_some(Provider::OpenClaw));
    let meta = match &nested {
        Some(block) => ScalarMap::from_mapping(block, file)?,
        None => ScalarMap::new(),
    };

    let text = |key: &str| fields.get(key).map(ToString::to_string);
    let name = text("name")
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| SkillError::validation("name", format!("{} has no `name`", file.display())))?;
    let description = text("description")
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| {
            SkillError::validation("description", format!("{} has no `description`", file.display()))
        })?;
    let version = text("version").unwrap_or_else(|| {
        warnings.push(format!("no `version` in frontmatter; using {DEFAULT_VERSION}"));
        DEFAULT_VERSION.to_string()
    });

    let mut overrides = ScalarMap::new();
    for (key, value) in fields.iter() {
        if UNIVERSAL_KEYS.contains(&key) {
            continue;
        }
        if provider.is_some() {
            overrides.insert(key, value.clone());
        } else {
            warnings.push(format!(
                "dropped provider field `{key}`; pass --provider to keep it"
            ));
        }
    }

    Ok(ImportedSkill {
        name,
        version,
        description,
        license: text("license"),
        homepage: text("homepage"),
        meta,
        provider,
        overrides,
        instructions: escape_template(body),
        scripts: Scripts::new(),
        warnings,
    })
}

/// Escape every `{{` so the text renders as itself.
#[must_use]
pub fn escape_template(text: &str) -> String {
    let mut escaped = text.replace("{{", "\\{{");
    if !escaped.is_empty() && !escaped.ends_with('\n') {
        escaped.push('\n');
    }
    escaped
}

/// Write the package under `dir` and return the written paths.
///
/// A known provider always gets a `providers/<p>/metadata.yaml`, so the
/// package targets that provider until more are added.
pub fn write_package(skill: &ImportedSkill, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = vec![
        (dir.join(MANIFEST_FILE), manifest_yaml(skill)?.into_bytes()),
        (
            dir.join(INSTRUCTIONS_FILE),
            skill.instructions.clone().into_bytes(),
        ),
    ];
    if let Some(provider) = skill.provider {
        let overrides = if skill.overrides.is_empty() {
            format!("# Metadata overrides for {provider}.\n")
        } else {
            to_yaml(&scalar_mapping(&skill.overrides), PROVIDER_METADATA_FILE)?
        };
        files.push((
            dir.join(PROVIDERS_DIR)
                .join(provider.as_str())
                .join(PROVIDER_METADATA_FILE),
            overrides.into_bytes(),
        ));
    }
    for (name, content) in &skill.scripts {
        files.push((dir.join(SCRIPTS_DIR).join(name), content.clone()));
    }

    for (path, content) in &files {
        write_file(path, content)?;
    }
    Ok(files.into_iter().map(|(path, _)| path).collect())
}

fn manifest_yaml(skill: &ImportedSkill) -> Result<String> {
    let mut manifest = Mapping::new();
    let mut put = |key: &str, value: &str| {
        manifest.insert(
            YamlValue::String(key.to_string()),
            YamlValue::String(value.to_string()),
        );
    };
    put("name", &skill.name);
    put("version", &skill.version);
    put("description", &skill.description);
    if let Some(license) = &skill.license {
        put("license", license);
    }
    if let Some(homepage) = &skill.homepage {
        put("homepage", homepage);
    }
    if !skill.meta.is_empty() {
        manifest.insert(
            YamlValue::String("meta".to_string()),
            YamlValue::Mapping(scalar_mapping(&skill.meta)),
        );
    }
    to_yaml(&manifest, MANIFEST_FILE)
}

fn scalar_mapping(map: &ScalarMap) -> Mapping {
    map.iter()
        .map(|(key, value)| (YamlValue::String(key.to_string()), value.to_yaml()))
        .collect()
}

fn to_yaml(mapping: &Mapping, file: &str) -> Result<String> {
    serde_yaml::to_string(mapping)
        .map_err(|err| SkillError::Config(format!("serialize {file}: {err}")))
}
