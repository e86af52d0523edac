//! skill-universe config - Show the effective configuration

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::config::Config;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Only print the path of the config file in use
    #[arg(long)]
    pub path: bool,
}

#[derive(Serialize)]
struct ConfigReport {
    source: Option<String>,
    output_root: String,
    providers: Vec<String>,
}

pub fn run(ctx: &AppContext, args: &ConfigArgs) -> Result<()> {
    let config = &ctx.config;
    let source = config.source.as_ref().map(|p| p.display().to_string());

    if args.path {
        // Nothing loaded: show where the user file would live.
        let path = source.or_else(|| Config::global_path().map(|p| p.display().to_string()));
        if ctx.robot {
            return emit_json(&robot_ok(serde_json::json!({ "path": path })));
        }
        println!("{}", path.unwrap_or_default());
        return Ok(());
    }

    let output_root = config.output_root()?.display().to_string();
    let providers: Vec<String> = config
        .default_providers()?
        .iter()
        .map(ToString::to_string)
        .collect();

    if ctx.robot {
        return emit_json(&robot_ok(ConfigReport {
            source,
            output_root,
            providers,
        }));
    }

    let provider_list = if providers.is_empty() {
        "(declared by package)".to_string()
    } else {
        providers.join(", ")
    };
    let mut layout = HumanLayout::new();
    layout
        .kv("Source", source.as_deref().unwrap_or("(defaults)"))
        .kv("Output", &output_root)
        .kv("Providers", &provider_list);
    let toml = config.to_toml()?;
    if !toml.trim().is_empty() {
        layout.push_line("").push_line(toml.trim_end());
    }
    emit_human(layout);
    Ok(())
}
