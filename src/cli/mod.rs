//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod output;

pub use commands::Commands;

/// Compile provider-agnostic skills into provider-specific artifacts.
#[derive(Parser, Debug)]
#[command(name = "skill-universe", version, about)]
#[command(
    long_about = "Compile a universal skill package (skill.yaml + INSTRUCTIONS.md) into \
                  SKILL.md bundles for each supported provider: openclaw, claude-code, codex."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Machine-readable JSON output on stdout, JSON logs on stderr
    #[arg(long, global = true)]
    pub robot: bool,

    /// Path to a config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
