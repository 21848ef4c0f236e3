//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// evwh - EV registration warehouse loader
#[derive(Parser, Debug)]
#[command(name = "evwh")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default evwh.yml
    Init(InitArgs),

    /// Extract, transform and load the star schema
    Run(RunArgs),

    /// Print descriptive statistics of the raw data
    Profile(ProfileArgs),
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write evwh.yml into
    #[arg(short, long, default_value = ".")]
    pub dir: String,

    /// Overwrite an existing evwh.yml
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Read registrations from a local CSV instead of the configured URL
    #[arg(short, long)]
    pub input: Option<String>,

    /// Override the DuckDB path (`:memory:` for a throwaway database)
    #[arg(short, long)]
    pub database: Option<String>,
}

/// Arguments for the profile command
#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Read registrations from a local CSV instead of the configured URL
    #[arg(short, long)]
    pub input: Option<String>,

    /// Number of most frequent values shown per categorical column
    #[arg(short, long, default_value_t = 10)]
    pub top: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: ProfileOutput,
}

/// Profile output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileOutput {
    /// Human-readable report
    Text,
    /// JSON document
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
