//! skill-universe check - Validate a skill package without writing output

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::core::loader::load_package;
use crate::core::resolver::InstructionSet;
use crate::core::validation::{ValidationMode, validate};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Skill package directory
    pub dir: PathBuf,
}

#[derive(Serialize)]
struct CheckReport {
    name: String,
    version: String,
    description: String,
    providers: Vec<String>,
}

pub fn run(ctx: &AppContext, args: &CheckArgs) -> Result<()> {
    let package = load_package(&args.dir)?;
    let validated = validate(&package, ValidationMode::Check)?;
    // Syntax lint only; rendering needs a provider pass.
    InstructionSet::parse(&package)?;

    let metadata = &validated.metadata;
    let providers: Vec<String> = package.supported.iter().map(ToString::to_string).collect();

    if ctx.robot {
        let mut response = robot_ok(CheckReport {
            name: metadata.name.clone(),
            version: metadata.version.clone(),
            description: metadata.description.clone(),
            providers,
        });
        response.warnings = validated
            .warnings
            .iter()
            .map(|w| format!("{}: {}", w.field, w.message))
            .collect();
        return emit_json(&response);
    }

    let mut layout = HumanLayout::new();
    layout
        .kv("Name", &metadata.name)
        .kv("Version", &metadata.version)
        .kv("Providers", &providers.join(", "));
    for warning in &validated.warnings {
        layout.warning(&warning.message);
    }
    layout.push_line("Skill package is valid.");
    emit_human(layout);
    Ok(())
}
