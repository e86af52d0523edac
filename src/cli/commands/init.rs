//! skill-universe init - Scaffold a new skill package

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::core::loader::{
    INSTRUCTIONS_FILE, MANIFEST_FILE, PROVIDER_METADATA_FILE, PROVIDERS_DIR,
};
use crate::core::provider::Provider;
use crate::error::{Result, SkillError};
use crate::utils::fs::{ensure_dir, write_file};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to create the skill package in
    pub dir: PathBuf,

    /// Skill name (defaults to the directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Overwrite an existing skill.yaml
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Serialize)]
struct ScaffoldManifest<'a> {
    name: &'a str,
    version: &'a str,
    description: String,
    license: &'a str,
}

#[derive(Serialize)]
struct InitReport {
    name: String,
    dir: String,
    files: Vec<String>,
}

const SCAFFOLD_INSTRUCTIONS: &str = "# {{name}}\n\n{{description}}\n\n## Usage\n\nDescribe how the agent should use this skill.\n";

pub fn run(robot: bool, args: &InitArgs) -> Result<()> {
    let name = match &args.name {
        Some(name) => name.trim().to_string(),
        None => derive_name(&args.dir)?,
    };
    if name.is_empty() {
        return Err(SkillError::validation("name", "skill name must be non-empty"));
    }

    refuse_overwrite(&args.dir, args.force)?;

    let files = scaffold(&args.dir, &name)?;
    info!(name = %name, dir = %args.dir.display(), "initialized skill package");

    if robot {
        return emit_json(&robot_ok(InitReport {
            name,
            dir: args.dir.display().to_string(),
            files: files.iter().map(|f| f.display().to_string()).collect(),
        }));
    }

    let mut layout = HumanLayout::new();
    layout
        .push_line(format!(
            "Initialized skill `{name}` at {}",
            args.dir.display()
        ))
        .kv("Next", &format!("skill-universe compile {}", args.dir.display()));
    emit_human(layout);
    Ok(())
}

/// Fail when `dir` already holds a package, unless `force` is set.
pub(super) fn refuse_overwrite(dir: &Path, force: bool) -> Result<()> {
    let manifest_path = dir.join(MANIFEST_FILE);
    if manifest_path.exists() && !force {
        return Err(SkillError::validation(
            "init",
            format!(
                "{} already exists (use --force to overwrite)",
                manifest_path.display()
            ),
        ));
    }
    Ok(())
}

/// Write the scaffold and return the created paths.
fn scaffold(dir: &Path, name: &str) -> Result<Vec<PathBuf>> {
    ensure_dir(dir)?;
    let manifest = ScaffoldManifest {
        name,
        version: "0.1.0",
        description: format!("{name} skill"),
        license: "MIT",
    };
    let yaml = serde_yaml::to_string(&manifest)
        .map_err(|err| SkillError::Config(format!("serialize {MANIFEST_FILE}: {err}")))?;

    let mut files = vec![
        (dir.join(MANIFEST_FILE), yaml),
        (
            dir.join(INSTRUCTIONS_FILE),
            SCAFFOLD_INSTRUCTIONS.to_string(),
        ),
    ];
    for provider in Provider::ALL {
        files.push((
            dir.join(PROVIDERS_DIR)
                .join(provider.as_str())
                .join(PROVIDER_METADATA_FILE),
            format!(
                "# Metadata overrides for {provider}.\n# Keys here replace skill.yaml values in {provider} output only.\n"
            ),
        ));
    }

    for (path, content) in &files {
        write_file(path, content.as_bytes())?;
    }
    Ok(files.into_iter().map(|(path, _)| path).collect())
}

fn derive_name(dir: &Path) -> Result<String> {
    let absolute = crate::utils::fs::absolutize(dir)?;
    absolute
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            SkillError::validation("name", "cannot derive a skill name; pass --name")
        })
}
