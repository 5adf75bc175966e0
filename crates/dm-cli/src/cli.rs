//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// duckmigrate - inspect and repair migration version state
#[derive(Parser, Debug)]
#[command(name = "dm")]
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

    /// Database address, e.g. duckdb://./app.duckdb
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Config file (default: duckmigrate.yml in the current directory, if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the migrations table name
    #[arg(long, global = true)]
    pub migrations_table: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the current version and dirty flag
    Version,

    /// Record a version as cleanly applied without running anything
    Force(ForceArgs),

    /// Execute a migration script under the migration lock
    Exec(ExecArgs),

    /// Drop every table in the database, including the version table
    Drop(DropArgs),

    /// List the tables in the database
    Tables,
}

/// Arguments for the force command
#[derive(Args, Debug)]
pub struct ForceArgs {
    /// Version to record (-1 clears the version)
    #[arg(allow_negative_numbers = true)]
    pub version: i64,
}

/// Arguments for the exec command
#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Path to the SQL script
    pub file: PathBuf,

    /// Version this script brings the database to; marked dirty until it succeeds
    #[arg(long)]
    pub version: Option<i64>,
}

/// Arguments for the drop command
#[derive(Args, Debug)]
pub struct DropArgs {
    /// Confirm the destructive drop
    #[arg(long)]
    pub yes: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
