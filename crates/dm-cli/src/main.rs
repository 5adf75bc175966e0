//! duckmigrate CLI - inspect and repair migration version state

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{drop, exec, force, tables, version};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    match &cli.command {
        cli::Commands::Version => version::execute(&cli.global),
        cli::Commands::Force(args) => force::execute(args, &cli.global),
        cli::Commands::Exec(args) => exec::execute(args, &cli.global),
        cli::Commands::Drop(args) => drop::execute(args, &cli.global),
        cli::Commands::Tables => tables::execute(&cli.global),
    }
}
