//! In-memory skill package model.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value as YamlValue};

use super::provider::Provider;
use crate::error::{Result, SkillError};

/// A scalar metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    pub(crate) fn from_yaml(value: &YamlValue) -> Option<Self> {
        match value {
            YamlValue::Bool(b) => Some(Self::Bool(*b)),
            YamlValue::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float)),
            YamlValue::String(s) => Some(Self::String(s.clone())),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_yaml(&self) -> YamlValue {
        match self {
            Self::Bool(b) => YamlValue::Bool(*b),
            Self::Int(i) => YamlValue::Number((*i).into()),
            Self::Float(f) => YamlValue::Number((*f).into()),
            Self::String(s) => YamlValue::String(s.clone()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => f.write_str(&format_float(*x)),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// Render a float the way YAML frontmatter spells it, so `1.0` stays `1.0`
/// in instruction bodies.
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return ".nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { ".inf" } else { "-.inf" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e16 || (magnitude != 0.0 && magnitude < 1e-5) {
        format!("{value:e}")
    } else if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Insertion-ordered string → scalar map.
///
/// Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarMap(Vec<(String, Scalar)>);

impl ScalarMap {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Scalar) {
        let key = key.into();
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Convert a YAML mapping, rejecting non-string keys and non-scalar values.
    pub fn from_mapping(mapping: &Mapping, file: &Path) -> Result<Self> {
        let mut map = Self::new();
        for (key, value) in mapping {
            let key = key.as_str().ok_or_else(|| SkillError::Parse {
                file: file.to_path_buf(),
                message: format!("metadata keys must be strings, found {key:?}"),
            })?;
            let scalar = Scalar::from_yaml(value).ok_or_else(|| SkillError::Parse {
                file: file.to_path_buf(),
                message: format!("value for `{key}` must be a scalar"),
            })?;
            map.insert(key, scalar);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for ScalarMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries: Mapping = Mapping::deserialize(deserializer)?;
        let mut map = Self::new();
        for (key, value) in &entries {
            let key = key
                .as_str()
                .ok_or_else(|| serde::de::Error::custom("meta keys must be strings"))?;
            let scalar = Scalar::from_yaml(value).ok_or_else(|| {
                serde::de::Error::custom(format!("meta value for `{key}` must be a scalar"))
            })?;
            map.insert(key, scalar);
        }
        Ok(map)
    }
}

/// A declared configuration field exposed to templates as `config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigField {
    pub key: String,
    #[serde(default)]
    pub description: String,
}

/// Raw `skill.yaml` contents. Required fields stay optional here so the
/// validator can report exactly which one is missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<Scalar>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub meta: ScalarMap,
    #[serde(default)]
    pub config: Vec<ConfigField>,
    #[serde(default)]
    pub providers: Option<Vec<String>>,
}

/// Per-provider overrides from `providers/<name>/`.
#[derive(Debug, Clone, Default)]
pub struct ProviderProfile {
    pub metadata_path: PathBuf,
    pub overrides: ScalarMap,
    pub instructions: Option<String>,
    pub instructions_path: PathBuf,
    pub scripts: Scripts,
}

/// Relative script path (with `/` separators) → file bytes.
pub type Scripts = BTreeMap<String, Vec<u8>>;

/// A skill package as read from disk, before validation.
#[derive(Debug, Clone)]
pub struct SkillPackage {
    pub root: PathBuf,
    pub manifest: SkillManifest,
    pub instructions: Option<String>,
    pub supported: Vec<Provider>,
    pub profiles: BTreeMap<Provider, ProviderProfile>,
    pub scripts: Scripts,
}

impl SkillPackage {
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("skill.yaml")
    }

    #[must_use]
    pub fn instructions_path(&self) -> PathBuf {
        self.root.join("INSTRUCTIONS.md")
    }

    #[must_use]
    pub fn profile(&self, provider: Provider) -> Option<&ProviderProfile> {
        self.profiles.get(&provider)
    }
}

/// Validated skill metadata. Provider resolution works on copies of this.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub name: String,
    pub version: String,
    pub description: String,
    pub license: Option<String>,
    pub homepage: Option<String>,
    pub meta: ScalarMap,
    pub config: Vec<ConfigField>,
    /// Override keys that are not universal fields, in declared order.
    pub provider_fields: ScalarMap,
}
