use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::args::InitCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::SUCCESS_MARK;
use super::{apply_overrides, source_root};
use crate::config::{CONFIG_FILE_NAME, Config};

/// Write a default config into the source root, seeded with any language
/// flags. An existing config is never overwritten.
pub fn init(cmd: InitCommand) -> Result<ExitStatus> {
    let common = &cmd.args.common;
    let config_path = source_root(common).join(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!("Error: {} already exists", config_path.display());
        return Ok(ExitStatus::Failure);
    }

    let mut config = Config::default();
    apply_overrides(common, &mut config);
    config.validate()?;

    fs::write(&config_path, config.to_json_pretty()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", config_path.display()).green()
    );

    Ok(ExitStatus::Success)
}
