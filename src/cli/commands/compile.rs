//! skill-universe compile - Build provider bundles from a skill package

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit_json, robot_ok};
use crate::compiler::{Compiler, ProviderSelection};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Skill package directory
    pub dir: PathBuf,

    /// Compile for a single provider
    #[arg(long, short, value_name = "PROVIDER", conflicts_with = "providers")]
    pub target: Option<String>,

    /// Compile for a comma-separated list of providers
    #[arg(long, value_name = "LIST")]
    pub providers: Option<String>,

    /// Output root (defaults to output.root in config, else ~/.skill-universe)
    #[arg(long, short, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct CompileOutput {
    name: String,
    version: String,
    compiled: Vec<CompiledEntry>,
}

#[derive(Serialize)]
struct CompiledEntry {
    provider: String,
    dir: String,
    files: Vec<String>,
}

pub fn run(ctx: &AppContext, args: &CompileArgs) -> Result<()> {
    let mut selection =
        ProviderSelection::from_args(args.target.as_deref(), args.providers.as_deref())?;
    if selection == ProviderSelection::Declared {
        let defaults = ctx.config.default_providers()?;
        if !defaults.is_empty() {
            selection = ProviderSelection::List(defaults);
        }
    }

    let output_root = match &args.output {
        Some(path) => path.clone(),
        None => ctx.config.output_root()?,
    };

    let robot = ctx.robot;
    let report = Compiler::new(output_root).compile(&args.dir, &selection, |compiled| {
        if !robot {
            println!(
                "Compiled {} -> {}",
                compiled.provider,
                compiled.dir.display()
            );
        }
    })?;

    if robot {
        let output = CompileOutput {
            name: report.name,
            version: report.version,
            compiled: report
                .compiled
                .iter()
                .map(|c| CompiledEntry {
                    provider: c.provider.to_string(),
                    dir: c.dir.display().to_string(),
                    files: c.files.iter().map(|f| f.display().to_string()).collect(),
                })
                .collect(),
        };
        let mut response = robot_ok(output);
        response.warnings = report
            .warnings
            .iter()
            .map(|w| format!("{}: {}", w.field, w.message))
            .collect();
        return emit_json(&response);
    }
    Ok(())
}
