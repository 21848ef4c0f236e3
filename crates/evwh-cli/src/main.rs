//! evwh CLI - extract, transform and load EV registrations into a star schema

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{init, profile, run};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match &cli.command {
        cli::Commands::Init(args) => init::execute(args),
        cli::Commands::Run(args) => run::execute(args, &cli.global),
        cli::Commands::Profile(args) => profile::execute(args, &cli.global),
    }
}
