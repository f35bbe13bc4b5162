use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::LOCAL_CONFIG_NAME;

/// Output format for `total`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "line-tally")]
#[command(author, version, about = "Count non-empty lines across a gitignore-aware file tree")]
#[command(long_about = "Counts the non-empty lines of every file under a root that the root's \
    .gitignore does not exclude, and keeps the total current as files change.\n\n\
    Exit codes:\n  \
    0 - Success\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file (default: <ROOT>/.line-tally.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the non-empty line count of a single file
    File(FileArgs),

    /// Scan a root once and print its total
    Total(TotalArgs),

    /// Scan a root, then keep the total current as files change
    Watch(WatchArgs),

    /// Generate a default configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct FileArgs {
    /// File to count
    pub path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct TotalArgs {
    /// Root directory to scan
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Output format [possible values: text, json]
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also print the count of every tracked file
    #[arg(long)]
    pub list: bool,
}

#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Root directory to watch
    #[arg(default_value = ".")]
    pub root: PathBuf,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long, default_value = LOCAL_CONFIG_NAME)]
    pub output: PathBuf,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
