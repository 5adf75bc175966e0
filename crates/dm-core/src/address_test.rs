use super::*;

#[test]
fn test_parse_absolute_path() {
    let addr = Address::parse("duckdb:///tmp/run/migrate.duckdb").unwrap();
    assert_eq!(addr.scheme, "duckdb");
    assert_eq!(addr.path, "/tmp/run/migrate.duckdb");
    assert_eq!(addr.migrations_table, None);
    assert_eq!(addr.pool_size, None);
    assert!(addr.options.is_empty());
    assert!(!addr.is_memory());
}

#[test]
fn test_parse_relative_path() {
    let addr = Address::parse("duckdb://./data/app.duckdb").unwrap();
    assert_eq!(addr.path, "./data/app.duckdb");
}

#[test]
fn test_path_is_not_percent_decoded() {
    let addr =
        Address::parse("duckdb:///tmp/my%20db.duckdb?x-migrations-table=my%5Fversions").unwrap();
    assert_eq!(addr.path, "/tmp/my%20db.duckdb");
    // Query values are still decoded
    assert_eq!(addr.migrations_table.unwrap().as_str(), "my_versions");
}

#[test]
fn test_parse_memory() {
    let addr = Address::parse("duckdb://:memory:").unwrap();
    assert!(addr.is_memory());
}

#[test]
fn test_scheme_is_lowercased() {
    let addr = Address::parse("DuckDB://db.duckdb").unwrap();
    assert_eq!(addr.scheme, "duckdb");
}

#[test]
fn test_migrations_table_param() {
    let addr = Address::parse("duckdb://db.duckdb?x-migrations-table=my_migration_table").unwrap();
    assert_eq!(
        addr.migrations_table.unwrap().as_str(),
        "my_migration_table"
    );
    // driver params never leak into the path or store options
    assert_eq!(addr.path, "db.duckdb");
    assert!(addr.options.is_empty());
}

#[test]
fn test_empty_migrations_table_param_means_default() {
    let addr = Address::parse("duckdb://db.duckdb?x-migrations-table=").unwrap();
    assert_eq!(addr.migrations_table, Some(MigrationsTable::default()));
}

#[test]
fn test_invalid_migrations_table_param() {
    let err = Address::parse("duckdb://db.duckdb?x-migrations-table=bad%20name").unwrap_err();
    assert!(matches!(err, CoreError::InvalidTableName { .. }));
}

#[test]
fn test_pool_size_param() {
    let addr = Address::parse("duckdb://db.duckdb?x-pool-size=3").unwrap();
    assert_eq!(addr.pool_size, Some(3));

    for bad in ["0", "-1", "ten"] {
        let err = Address::parse(&format!("duckdb://db.duckdb?x-pool-size={bad}")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidAddress { .. }), "{bad}");
    }
}

#[test]
fn test_store_options_are_kept_in_order() {
    let addr =
        Address::parse("duckdb://db.duckdb?threads=2&x-unknown=1&access_mode=READ_WRITE").unwrap();
    assert_eq!(
        addr.options,
        vec![
            ("threads".to_string(), "2".to_string()),
            ("access_mode".to_string(), "READ_WRITE".to_string()),
        ]
    );
}

#[test]
fn test_malformed_addresses() {
    for bad in [
        "",
        "db.duckdb",
        "duckdb:/db.duckdb",
        "://db.duckdb",
        "1db://x",
        "duck db://x",
        "duckdb://",
        "duckdb://?x-migrations-table=t",
    ] {
        let err = Address::parse(bad).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidAddress { .. }),
            "expected InvalidAddress for {bad:?}, got {err}"
        );
    }
}

#[test]
fn test_scheme_of() {
    assert_eq!(scheme_of("duckdb://x").unwrap(), "duckdb");
    assert_eq!(scheme_of("my+driver://x").unwrap(), "my+driver");
    assert!(scheme_of("no-separator").is_err());
}
