//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Scan the source root and list translatable text
//! - `run`: Extract, translate, assign keys and write catalogs
//! - `init`: Create a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Source code root directory (default: current directory)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Language of the text in the source code (overrides config file)
    #[arg(long)]
    pub source_language: Option<String>,

    /// Language to translate into (overrides config file)
    /// Can be specified multiple times: --target-language en --target-language ja
    #[arg(long = "target-language", value_name = "LANG")]
    pub target_languages: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print the extraction report as JSON instead of a listing
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: ExtractArgs,
}

#[derive(Debug, Parser)]
pub struct RunArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Show what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct RunCommand {
    #[command(flatten)]
    pub args: RunArgs,
}

#[derive(Debug, Parser)]
pub struct InitArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    #[command(flatten)]
    pub args: InitArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List translatable text found in the source code
    Extract(ExtractCommand),
    /// Extract text, translate it and write key catalogs for every language
    Run(RunCommand),
    /// Initialize a new .autoi18nrc.json configuration file
    Init(InitCommand),
}
