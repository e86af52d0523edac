use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;

/// Per-invocation state shared by commands.
pub struct AppContext {
    pub config: Config,
    pub robot: bool,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self {
            config: Config::load(cli.config.as_deref())?,
            robot: cli.robot,
        })
    }
}
