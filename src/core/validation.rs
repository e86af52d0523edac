//! Skill package validation.
//!
//! Fatal checks run in a fixed order so the first reported error is stable:
//! name, version, description, config keys, provider override keys, then
//! instructions presence.

use std::collections::BTreeSet;
use std::path::{Component, Path};

use semver::Version;
use tracing::debug;

use super::package::{Metadata, Scalar, ScalarMap, SkillPackage};
use crate::error::{Result, SkillError};

/// Override keys that would replace a whole collection.
const RESERVED_OVERRIDE_KEYS: [&str; 2] = ["meta", "config"];

/// Whether a missing `INSTRUCTIONS.md` is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Compile,
    Check,
}

/// A validation warning (not an error)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

impl ValidationWarning {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Outcome of a successful validation.
#[derive(Debug, Clone)]
pub struct ValidatedSkill {
    pub metadata: Metadata,
    pub warnings: Vec<ValidationWarning>,
}

/// Validate a loaded package and build its universal [`Metadata`].
pub fn validate(package: &SkillPackage, mode: ValidationMode) -> Result<ValidatedSkill> {
    let manifest = &package.manifest;
    let mut warnings = vec![];

    let name = required("name", manifest.name.as_deref(), "skill name is required")?;
    validate_skill_name("name", &name)?;
    let version = manifest
        .version
        .as_ref()
        .map(Scalar::to_string)
        .ok_or_else(|| SkillError::validation("version", "skill version is required"))?;
    validate_semver("version", &version)?;
    let description = required(
        "description",
        manifest.description.as_deref(),
        "skill description is required",
    )?;

    let mut seen = BTreeSet::new();
    for field in &manifest.config {
        if field.key.trim().is_empty() {
            return Err(SkillError::validation("config", "config key must be non-empty"));
        }
        if !seen.insert(field.key.as_str()) {
            return Err(SkillError::validation(
                "config",
                format!("duplicate config key `{}`", field.key),
            ));
        }
    }

    for profile in package.profiles.values() {
        validate_overrides(&profile.overrides).map_err(|err| match err {
            SkillError::Validation { field, message } => SkillError::Validation {
                field,
                message: format!("{message} (in {})", profile.metadata_path.display()),
            },
            other => other,
        })?;
    }

    if package.instructions.is_none() {
        let missing = SkillError::MissingInstructions(package.instructions_path());
        match mode {
            ValidationMode::Compile => return Err(missing),
            ValidationMode::Check => {
                warnings.push(ValidationWarning::new("instructions", missing.to_string()));
            }
        }
    }

    if manifest.license.as_deref().is_none_or(|l| l.trim().is_empty()) {
        warnings.push(ValidationWarning::new(
            "license",
            "skill should declare a license",
        ));
    }
    if let Some(homepage) = manifest
        .homepage
        .as_deref()
        .filter(|h| !h.starts_with("http://") && !h.starts_with("https://"))
    {
        warnings.push(ValidationWarning::new(
            "homepage",
            format!("homepage `{homepage}` should be an http(s) URL"),
        ));
    }

    debug!(
        name = %name,
        version = %version,
        warnings = warnings.len(),
        "validated skill package"
    );

    Ok(ValidatedSkill {
        metadata: Metadata {
            name,
            version,
            description,
            license: manifest.license.clone(),
            homepage: manifest.homepage.clone(),
            meta: manifest.meta.clone(),
            config: manifest.config.clone(),
            provider_fields: ScalarMap::new(),
        },
        warnings,
    })
}

/// Overrides must not replace collections, and overridden core fields must
/// still satisfy the core rules.
fn validate_overrides(overrides: &ScalarMap) -> Result<()> {
    for (key, value) in overrides.iter() {
        if RESERVED_OVERRIDE_KEYS.contains(&key) {
            return Err(SkillError::validation(
                key,
                format!("`{key}` is reserved and cannot be overridden"),
            ));
        }
        if key.strip_prefix("meta.").is_some_and(str::is_empty) {
            return Err(SkillError::validation(key, "meta override needs a key"));
        }
        let text = value.to_string();
        match key {
            "name" => {
                let name = required(key, Some(text.as_str()), "name override must be non-empty")?;
                validate_skill_name(key, &name)?;
            }
            "description" => {
                required(key, Some(text.as_str()), "description override must be non-empty")?;
            }
            "version" => validate_semver("version", &text)?,
            _ => {}
        }
    }
    Ok(())
}

fn required(field: &str, value: Option<&str>, message: &str) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(SkillError::validation(field, message)),
    }
}

/// The name becomes one directory under `<out>/<provider>/`, so it must be a
/// single normal path component.
fn validate_skill_name(field: &str, name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single || name.contains(['/', '\\']) {
        return Err(SkillError::validation(
            field,
            format!("name `{name}` must be a single directory name without path separators"),
        ));
    }
    Ok(())
}

fn validate_semver(field: &str, value: &str) -> Result<()> {
    Version::parse(value).map_err(|err| {
        SkillError::validation(field, format!("`{value}` is not valid semver: {err}"))
    })?;
    Ok(())
}
