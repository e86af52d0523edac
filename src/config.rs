use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::provider::Provider;
use crate::error::{Result, SkillError};
use crate::utils::fs::expand_home;

pub const CONFIG_ENV: &str = "SKILL_UNIVERSE_CONFIG";
pub const OUTPUT_ENV: &str = "SKILL_UNIVERSE_OUTPUT";
pub const PROVIDERS_ENV: &str = "SKILL_UNIVERSE_PROVIDERS";

/// Directory under `$HOME` used when nothing else names an output root.
pub const DEFAULT_OUTPUT_DIR: &str = ".skill-universe";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub compile: CompileConfig,
    /// File the values were read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for compiled skills.
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompileConfig {
    /// Default providers when the command line names none.
    #[serde(default)]
    pub providers: Vec<String>,
}

impl Config {
    /// Load from `--config`, else `SKILL_UNIVERSE_CONFIG`, else the user
    /// config file, then apply environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(explicit_path, |key| std::env::var(key).ok())
    }

    pub fn load_with_env(
        explicit_path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| env(CONFIG_ENV).map(PathBuf::from));

        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(SkillError::Config(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
                Some(path)
            }
            None => Self::global_path(),
        };
        if let Some(path) = path {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
                config.source = Some(path);
            }
        }

        config.apply_env_overrides(&env);
        Ok(config)
    }

    /// `<config_dir>/skill-universe/config.toml`, whether or not it exists.
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skill-universe/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SkillError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| SkillError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.output {
            self.output.merge(patch);
        }
        if let Some(patch) = patch.compile {
            self.compile.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self, env: &impl Fn(&str) -> Option<String>) {
        if let Some(value) = env(OUTPUT_ENV).filter(|v| !v.trim().is_empty()) {
            self.output.root = Some(PathBuf::from(value));
        }
        if let Some(values) = env(PROVIDERS_ENV).map(|v| split_list(&v)) {
            self.compile.providers = values;
        }
    }

    /// Output root: config or env value with `~/` expanded, else
    /// `$HOME/.skill-universe`.
    pub fn output_root(&self) -> Result<PathBuf> {
        if let Some(root) = &self.output.root {
            return Ok(expand_home(&root.to_string_lossy()));
        }
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_OUTPUT_DIR))
            .ok_or_else(|| {
                SkillError::Config(
                    "home directory not found; pass --output or set output.root".to_string(),
                )
            })
    }

    /// The effective values as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self)
            .map_err(|err| SkillError::Config(format!("serialize config: {err}")))
    }

    /// Configured default providers, validated against the known set.
    pub fn default_providers(&self) -> Result<Vec<Provider>> {
        self.compile
            .providers
            .iter()
            .map(|name| name.trim().parse())
            .collect()
    }
}

impl OutputConfig {
    fn merge(&mut self, patch: OutputPatch) {
        if let Some(root) = patch.root {
            self.root = Some(root);
        }
    }
}

impl CompileConfig {
    fn merge(&mut self, patch: CompilePatch) {
        if let Some(providers) = patch.providers {
            self.providers = providers;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    pub output: Option<OutputPatch>,
    pub compile: Option<CompilePatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputPatch {
    pub root: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CompilePatch {
    pub providers: Option<Vec<String>>,
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}
