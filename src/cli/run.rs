use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{extract::extract, init::init, run::run as run_pipeline},
    exit_status::ExitStatus,
};

/// Dispatch a parsed command to its handler.
///
/// Errors are internal failures (config, I/O); the caller maps them to
/// [`ExitStatus::Error`].
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Run(cmd)) => run_pipeline(cmd),
        Some(Command::Init(cmd)) => init(cmd),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
