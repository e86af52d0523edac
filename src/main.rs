//! skill-universe - compile universal skills for openclaw, claude-code and
//! codex.

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use skill_universe::Result;
use skill_universe::app::AppContext;
use skill_universe::cli::output::robot_error;
use skill_universe::cli::{Cli, Commands};

fn main() -> ExitCode {
    // Usage errors exit 1 like every other failure; clap's default is 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.robot {
                println!("{}", robot_error(&e));
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Init(args) => skill_universe::cli::commands::init::run(cli.robot, args),
        Commands::Import(args) => skill_universe::cli::commands::import::run(cli.robot, args),
        Commands::Version => skill_universe::cli::commands::version::run(cli.robot),
        command => {
            let ctx = AppContext::from_cli(cli)?;
            skill_universe::cli::commands::run(&ctx, command)
        }
    }
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,skill_universe=warn",
        1 => "info,skill_universe=info",
        2 => "debug,skill_universe=debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.robot {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
