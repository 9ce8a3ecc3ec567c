//! Command-line layer: argument parsing, dispatch and console reports.
//!
//! Kept apart from `core` so the extraction engine can be used as a library.

use std::process::ExitCode;

use anyhow::Result;

pub mod args;
mod commands;
pub mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let status = run::run(args)?;
    Ok(status.into())
}
