//! Read a skill package directory into a [`SkillPackage`].

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Value as YamlValue;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::package::{ProviderProfile, ScalarMap, Scripts, SkillManifest, SkillPackage};
use super::provider::Provider;
use crate::error::{Result, SkillError};
use crate::utils::fs::read_optional;

pub const MANIFEST_FILE: &str = "skill.yaml";
pub const INSTRUCTIONS_FILE: &str = "INSTRUCTIONS.md";
pub const PROVIDER_METADATA_FILE: &str = "metadata.yaml";
pub const PROVIDERS_DIR: &str = "providers";
pub const SCRIPTS_DIR: &str = "scripts";

/// Load a package from `root`. Performs no validation beyond YAML syntax.
pub fn load_package(root: &Path) -> Result<SkillPackage> {
    if !root.is_dir() {
        return Err(SkillError::io_at(
            root,
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "skill package directory does not exist",
            ),
        ));
    }
    debug!(path = %root.display(), "loading skill package");

    let manifest_path = root.join(MANIFEST_FILE);
    let raw = std::fs::read_to_string(&manifest_path)
        .map_err(|err| SkillError::io_at(&manifest_path, err))?;
    let manifest = parse_manifest(&raw, &manifest_path)?;

    let instructions = read_optional(root.join(INSTRUCTIONS_FILE))?;
    let scripts = load_scripts(&root.join(SCRIPTS_DIR))?;

    let mut profiles = BTreeMap::new();
    for provider in Provider::ALL {
        let dir = root.join(PROVIDERS_DIR).join(provider.as_str());
        if dir.is_dir() {
            profiles.insert(provider, load_profile(&dir)?);
        }
    }
    warn_unknown_provider_dirs(&root.join(PROVIDERS_DIR));

    let supported = supported_providers(&manifest, &profiles)?;
    debug!(
        providers = ?supported,
        scripts = scripts.len(),
        has_instructions = instructions.is_some(),
        "loaded skill package"
    );

    Ok(SkillPackage {
        root: root.to_path_buf(),
        manifest,
        instructions,
        supported,
        profiles,
        scripts,
    })
}

pub fn parse_manifest(raw: &str, path: &Path) -> Result<SkillManifest> {
    if is_blank_yaml(raw) {
        return Ok(SkillManifest::default());
    }
    serde_yaml::from_str(raw).map_err(|err| SkillError::Parse {
        file: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Parse a provider `metadata.yaml` into an ordered override map.
pub fn parse_overrides(raw: &str, path: &Path) -> Result<ScalarMap> {
    if is_blank_yaml(raw) {
        return Ok(ScalarMap::new());
    }
    let value: YamlValue = serde_yaml::from_str(raw).map_err(|err| SkillError::Parse {
        file: path.to_path_buf(),
        message: err.to_string(),
    })?;
    match value {
        YamlValue::Null => Ok(ScalarMap::new()),
        YamlValue::Mapping(mapping) => ScalarMap::from_mapping(&mapping, path),
        _ => Err(SkillError::Parse {
            file: path.to_path_buf(),
            message: "expected a mapping of metadata overrides".to_string(),
        }),
    }
}

fn load_profile(dir: &Path) -> Result<ProviderProfile> {
    let metadata_path = dir.join(PROVIDER_METADATA_FILE);
    let overrides = match read_optional(&metadata_path)? {
        Some(raw) => parse_overrides(&raw, &metadata_path)?,
        None => ScalarMap::new(),
    };
    let instructions_path = dir.join(INSTRUCTIONS_FILE);
    let instructions = read_optional(&instructions_path)?;
    let scripts = load_scripts(&dir.join(SCRIPTS_DIR))?;
    Ok(ProviderProfile {
        metadata_path,
        overrides,
        instructions,
        instructions_path,
        scripts,
    })
}

/// Collect every file under `dir`, keyed by `/`-separated relative path.
pub fn load_scripts(dir: &Path) -> Result<Scripts> {
    let mut scripts = Scripts::new();
    if !dir.is_dir() {
        return Ok(scripts);
    }
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_path_buf();
            SkillError::io_at(&path, err.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(dir)
            .unwrap_or_else(|_| entry.path())
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let content =
            std::fs::read(entry.path()).map_err(|err| SkillError::io_at(entry.path(), err))?;
        scripts.insert(relative, content);
    }
    Ok(scripts)
}

fn supported_providers(
    manifest: &SkillManifest,
    profiles: &BTreeMap<Provider, ProviderProfile>,
) -> Result<Vec<Provider>> {
    if let Some(declared) = &manifest.providers {
        let mut providers = declared
            .iter()
            .map(|name| name.trim().parse::<Provider>())
            .collect::<Result<Vec<_>>>()?;
        providers.sort();
        providers.dedup();
        return Ok(providers);
    }
    if !profiles.is_empty() {
        return Ok(profiles.keys().copied().collect());
    }
    Ok(Provider::ALL.to_vec())
}

fn warn_unknown_provider_dirs(dir: &Path) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_dir() && name.parse::<Provider>().is_err() {
            warn!(provider = %name, "ignoring unknown provider directory");
        }
    }
}

/// Empty or comment-only YAML documents.
fn is_blank_yaml(raw: &str) -> bool {
    raw.lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#') || line == "---")
}
