//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod check;
pub mod compile;
pub mod config;
pub mod import;
pub mod init;
pub mod version;

use crate::app::AppContext;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Compile(args) => compile::run(ctx, args),
        Commands::Check(args) => check::run(ctx, args),
        Commands::Init(args) => init::run(ctx.robot, args),
        Commands::Import(args) => import::run(ctx.robot, args),
        Commands::Config(args) => config::run(ctx, args),
        Commands::Version => version::run(ctx.robot),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a skill package for one or more providers
    Compile(compile::CompileArgs),

    /// Validate a skill package without writing output
    Check(check::CheckArgs),

    /// Scaffold a new skill package
    Init(init::InitArgs),

    /// Convert an existing provider SKILL.md into a skill package
    Import(import::ImportArgs),

    /// Show the effective configuration
    Config(config::ConfigArgs),

    /// Print the skill-universe version
    Version,
}
