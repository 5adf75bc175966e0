use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn parse_force_negative_version() {
    let cli = Cli::try_parse_from(["dm", "force", "-1"]).unwrap();
    match cli.command {
        Commands::Force(args) => assert_eq!(args.version, -1),
        other => panic!("expected force, got {other:?}"),
    }
}

#[test]
fn parse_exec_with_version_and_globals() {
    let cli = Cli::try_parse_from([
        "dm",
        "exec",
        "migrations/0003_users.up.sql",
        "--version",
        "3",
        "-d",
        "duckdb://app.duckdb",
        "--migrations-table",
        "my_migration_table",
    ])
    .unwrap();
    assert_eq!(cli.global.database.as_deref(), Some("duckdb://app.duckdb"));
    assert_eq!(
        cli.global.migrations_table.as_deref(),
        Some("my_migration_table")
    );
    match cli.command {
        Commands::Exec(args) => {
            assert_eq!(args.version, Some(3));
            assert_eq!(args.file, PathBuf::from("migrations/0003_users.up.sql"));
        }
        other => panic!("expected exec, got {other:?}"),
    }
}

#[test]
fn parse_drop_defaults_to_unconfirmed() {
    let cli = Cli::try_parse_from(["dm", "drop"]).unwrap();
    match cli.command {
        Commands::Drop(args) => assert!(!args.yes),
        other => panic!("expected drop, got {other:?}"),
    }
}
