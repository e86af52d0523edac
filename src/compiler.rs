//! Compiler driver: load, validate, parse once, then resolve/render/emit per
//! provider and write the staged files.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::loader::load_package;
use crate::core::provider::Provider;
use crate::core::resolver::{InstructionSet, resolve};
use crate::core::validation::{ValidationMode, ValidationWarning, validate};
use crate::emit::{OutputBundle, emit};
use crate::error::Result;
use crate::utils::fs::{absolutize, write_file};

/// Which providers a compile run targets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProviderSelection {
    /// Every provider the package supports.
    #[default]
    Declared,
    Single(Provider),
    List(Vec<Provider>),
}

impl ProviderSelection {
    /// Build a selection from `--target` / `--providers` style inputs.
    /// Unknown names fail here, before anything is loaded.
    pub fn from_args(target: Option<&str>, providers: Option<&str>) -> Result<Self> {
        if let Some(target) = target {
            return Ok(Self::Single(target.trim().parse()?));
        }
        match providers {
            Some(list) => {
                let list = Provider::parse_list(list)?;
                if list.is_empty() {
                    Ok(Self::Declared)
                } else {
                    Ok(Self::List(list))
                }
            }
            None => Ok(Self::Declared),
        }
    }

    /// Requested providers, de-duplicated, in compilation order.
    #[must_use]
    pub fn providers(&self, supported: &[Provider]) -> Vec<Provider> {
        let mut providers = match self {
            Self::Declared => supported.to_vec(),
            Self::Single(provider) => vec![*provider],
            Self::List(list) => list.clone(),
        };
        providers.sort();
        providers.dedup();
        providers
    }
}

/// One provider's output after it has been written.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub provider: Provider,
    /// Absolute skill directory.
    pub dir: PathBuf,
    /// Absolute paths of every written file.
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CompileReport {
    pub name: String,
    pub version: String,
    pub warnings: Vec<ValidationWarning>,
    pub compiled: Vec<Compiled>,
}

/// Compiles skill packages into an output root.
#[derive(Debug, Clone)]
pub struct Compiler {
    output_root: PathBuf,
}

impl Compiler {
    #[must_use]
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    #[must_use]
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Produce every provider bundle in memory without writing anything.
    pub fn stage(
        package_dir: &Path,
        selection: &ProviderSelection,
    ) -> Result<(StagedSkill, Vec<OutputBundle>)> {
        let package = load_package(package_dir)?;
        let validated = validate(&package, ValidationMode::Compile)?;
        for warning in &validated.warnings {
            debug!(field = %warning.field, "{}", warning.message);
        }
        let instructions = InstructionSet::parse(&package)?;

        let providers = selection.providers(&package.supported);
        for provider in &providers {
            if !package.supported.contains(provider) {
                warn!(provider = %provider, "provider not declared by package; compiling anyway");
            }
        }

        let mut bundles = Vec::with_capacity(providers.len());
        for provider in providers {
            let record = resolve(&package, &validated.metadata, &instructions, provider)?;
            bundles.push(emit(&record)?);
        }

        let staged = StagedSkill {
            name: validated.metadata.name,
            version: validated.metadata.version,
            warnings: validated.warnings,
        };
        Ok((staged, bundles))
    }

    /// Compile `package_dir`, calling `on_compiled` after each provider's
    /// files are on disk. Existing files are overwritten and nothing is
    /// deleted.
    pub fn compile(
        &self,
        package_dir: &Path,
        selection: &ProviderSelection,
        mut on_compiled: impl FnMut(&Compiled),
    ) -> Result<CompileReport> {
        let (staged, bundles) = Self::stage(package_dir, selection)?;
        let root = absolutize(&self.output_root)?;

        let mut compiled = Vec::with_capacity(bundles.len());
        for bundle in bundles {
            let result = write_bundle(&root, &bundle)?;
            info!(
                provider = %result.provider,
                dir = %result.dir.display(),
                files = result.files.len(),
                "compiled provider"
            );
            on_compiled(&result);
            compiled.push(result);
        }

        Ok(CompileReport {
            name: staged.name,
            version: staged.version,
            warnings: staged.warnings,
            compiled,
        })
    }
}

/// Validated identity of a staged package.
#[derive(Debug, Clone)]
pub struct StagedSkill {
    pub name: String,
    pub version: String,
    pub warnings: Vec<ValidationWarning>,
}

fn write_bundle(root: &Path, bundle: &OutputBundle) -> Result<Compiled> {
    let dir = root.join(&bundle.dir);
    let mut files = Vec::with_capacity(bundle.files.len());
    for (relative, content) in &bundle.files {
        let path = dir.join(relative);
        write_file(&path, content)?;
        debug!(path = %path.display(), bytes = content.len(), "wrote file");
        files.push(path);
    }
    Ok(Compiled {
        provider: bundle.provider,
        dir,
        files,
    })
}
