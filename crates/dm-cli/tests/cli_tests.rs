//! End-to-end tests for the `dm` binary
//!
//! Each test works in its own temporary directory so config discovery and
//! the database file never leak between tests.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Path to the compiled dm binary
fn dm_bin() -> String {
    env!("CARGO_BIN_EXE_dm").to_string()
}

/// Run `dm` in `dir` and return (stdout, stderr, success).
fn run_dm(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(dm_bin())
        .current_dir(dir)
        .env_remove("DM_DATABASE_URL")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute dm with args {:?}: {}", args, e));
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

const DATABASE: &str = "duckdb://app.duckdb";

#[test]
fn test_version_of_fresh_database_is_nil() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, ok) = run_dm(dir.path(), &["version", "-d", DATABASE]);
    assert!(ok, "stderr: {stderr}");
    assert_eq!(stdout.trim(), "nil");
    assert!(dir.path().join("app.duckdb").exists());
}

#[test]
fn test_exec_then_version() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("1_users.up.sql"),
        "CREATE TABLE users (id INT, name VARCHAR);",
    )
    .unwrap();

    let (_, stderr, ok) = run_dm(
        dir.path(),
        &["exec", "1_users.up.sql", "--version", "1", "-d", DATABASE],
    );
    assert!(ok, "stderr: {stderr}");

    let (stdout, _, ok) = run_dm(dir.path(), &["version", "-d", DATABASE]);
    assert!(ok);
    assert_eq!(stdout.trim(), "1");

    let (stdout, _, ok) = run_dm(dir.path(), &["tables", "-d", DATABASE]);
    assert!(ok);
    let tables: Vec<&str> = stdout.lines().collect();
    assert_eq!(tables, vec!["main.schema_migrations", "main.users"]);
}

#[test]
fn test_failed_exec_leaves_dirty_and_force_repairs() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("bad.sql"), "CREATE TABLE (;").unwrap();

    let (_, stderr, ok) = run_dm(
        dir.path(),
        &["exec", "bad.sql", "--version", "2", "-d", DATABASE],
    );
    assert!(!ok);
    assert!(stderr.contains("D004"), "stderr: {stderr}");

    let (stdout, _, _) = run_dm(dir.path(), &["version", "-d", DATABASE]);
    assert_eq!(stdout.trim(), "2 (dirty)");

    // A dirty database refuses further scripts until forced.
    std::fs::write(dir.path().join("good.sql"), "CREATE TABLE t (id INT);").unwrap();
    let (_, stderr, ok) = run_dm(
        dir.path(),
        &["exec", "good.sql", "--version", "3", "-d", DATABASE],
    );
    assert!(!ok);
    assert!(stderr.contains("dirty"), "stderr: {stderr}");

    let (_, stderr, ok) = run_dm(dir.path(), &["force", "1", "-d", DATABASE]);
    assert!(ok, "stderr: {stderr}");
    let (stdout, _, _) = run_dm(dir.path(), &["version", "-d", DATABASE]);
    assert_eq!(stdout.trim(), "1");

    let (_, _, ok) = run_dm(dir.path(), &["force", "-1", "-d", DATABASE]);
    assert!(ok);
    let (stdout, _, _) = run_dm(dir.path(), &["version", "-d", DATABASE]);
    assert_eq!(stdout.trim(), "nil");
}

#[test]
fn test_force_rejects_versions_below_nil() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, ok) = run_dm(dir.path(), &["force", "-5", "-d", DATABASE]);
    assert!(!ok);
    assert!(stderr.contains("Invalid version -5"), "stderr: {stderr}");
}

#[test]
fn test_config_file_supplies_database_and_table() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("duckmigrate.yml"),
        "database: duckdb://configured.duckdb\nmigrations_table: cfg_versions\n",
    )
    .unwrap();

    let (_, stderr, ok) = run_dm(dir.path(), &["force", "7"]);
    assert!(ok, "stderr: {stderr}");

    let (stdout, _, ok) = run_dm(dir.path(), &["tables"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "main.cfg_versions");
}

#[test]
fn test_missing_database_is_an_error() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, ok) = run_dm(dir.path(), &["version"]);
    assert!(!ok);
    assert!(stderr.contains("No database address"), "stderr: {stderr}");
}

#[test]
fn test_drop_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("t.sql"), "CREATE TABLE t (id INT);").unwrap();
    let (_, _, ok) = run_dm(dir.path(), &["exec", "t.sql", "-d", DATABASE]);
    assert!(ok);

    let (_, stderr, ok) = run_dm(dir.path(), &["drop", "-d", DATABASE]);
    assert!(!ok);
    assert!(stderr.contains("--yes"), "stderr: {stderr}");

    let (stdout, stderr, ok) = run_dm(dir.path(), &["drop", "--yes", "-d", DATABASE]);
    assert!(ok, "stderr: {stderr}");
    assert_eq!(stdout.trim(), "Dropped 2 tables");
}

#[test]
fn test_unknown_scheme_is_reported() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, ok) = run_dm(dir.path(), &["version", "-d", "postgres://localhost/db"]);
    assert!(!ok);
    assert!(stderr.contains("D007"), "stderr: {stderr}");
}
