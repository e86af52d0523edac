//! skill-universe import - Turn an existing SKILL.md into a skill package

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::core::provider::Provider;
use crate::error::Result;
use crate::import::{read_skill, write_package};

use super::init::refuse_overwrite;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// SKILL.md file, or a directory containing one
    #[arg(value_name = "PATH")]
    pub source: PathBuf,

    /// Package directory to create (defaults to ./<name>)
    #[arg(long, short)]
    pub dir: Option<PathBuf>,

    /// Provider the SKILL.md was written for; its extra frontmatter keys
    /// become that provider's overrides
    #[arg(long, short)]
    pub provider: Option<String>,

    /// Overwrite an existing skill.yaml
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Serialize)]
struct ImportReport {
    name: String,
    dir: String,
    provider: Option<String>,
    files: Vec<String>,
}

pub fn run(robot: bool, args: &ImportArgs) -> Result<()> {
    let provider = args
        .provider
        .as_deref()
        .map(|name| name.trim().parse::<Provider>())
        .transpose()?;
    let skill = read_skill(&args.source, provider)?;
    let dir = args
        .dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&skill.name));
    refuse_overwrite(&dir, args.force)?;

    let files = write_package(&skill, &dir)?;
    info!(
        name = %skill.name,
        dir = %dir.display(),
        files = files.len(),
        "imported skill"
    );

    if robot {
        let mut response = robot_ok(ImportReport {
            name: skill.name,
            dir: dir.display().to_string(),
            provider: skill.provider.map(|p| p.to_string()),
            files: files.iter().map(|f| f.display().to_string()).collect(),
        });
        response.warnings = skill.warnings;
        return emit_json(&response);
    }

    let mut layout = HumanLayout::new();
    for warning in &skill.warnings {
        layout.warning(warning);
    }
    layout
        .push_line(format!(
            "Imported skill `{}` into {}",
            skill.name,
            dir.display()
        ))
        .kv("Next", &format!("skill-universe check {}", dir.display()));
    emit_human(layout);
    Ok(())
}
