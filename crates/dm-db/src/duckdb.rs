//! DuckDB version store driver

use crate::error::{DbError, DbResult};
use crate::lock::MigrationLock;
use crate::traits::{CatalogTable, Driver};
use dm_core::sql_utils::quote_ident;
use dm_core::{Address, MigrationsTable, VersionState};
use duckdb::{Connection, DuckdbConnectionManager};
use log::{debug, info, warn};

/// Address scheme served by [`DuckDbDriver`].
pub const SCHEME: &str = "duckdb";

/// Pool size used when the address does not set `x-pool-size`.
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Connection pool type the driver is built on.
pub type DuckDbPool = r2d2::Pool<DuckdbConnectionManager>;

/// Driver configuration passed to [`DuckDbDriver::with_instance`].
#[derive(Debug, Clone, Default)]
pub struct DriverConfig {
    /// Table holding the version record; `None` means `schema_migrations`
    pub migrations_table: Option<MigrationsTable>,
    /// Database location, for log messages only
    pub database_name: Option<String>,
}

/// Version store backed by a pooled DuckDB database.
///
/// Every operation checks a connection out of the pool and returns it before
/// returning, so no connection is held between `lock` and `unlock`.
pub struct DuckDbDriver {
    pool: DuckDbPool,
    lock: MigrationLock,
    table: MigrationsTable,
    database_name: Option<String>,
}

impl DuckDbDriver {
    /// Build a driver over an already-open pool and make sure the version
    /// table exists.
    ///
    /// Safe to call against a database initialized by an earlier run; the
    /// existing version record is left untouched.
    pub fn with_instance(pool: DuckDbPool, config: Option<DriverConfig>) -> DbResult<Self> {
        let config = config.ok_or(DbError::ConfigMissing)?;
        let driver = Self {
            pool,
            lock: MigrationLock::new(),
            table: config.migrations_table.unwrap_or_default(),
            database_name: config.database_name,
        };
        driver.ensure_version_table()?;
        Ok(driver)
    }

    /// Open a driver from a `duckdb://path[?params]` address.
    pub fn open(address: &str) -> DbResult<Self> {
        let address = Address::parse(address)?;
        if address.scheme != SCHEME {
            return Err(DbError::UnsupportedScheme {
                scheme: address.scheme,
            });
        }

        let pool = open_pool(&address)?;
        info!(
            "Opened DuckDB version store at {} (migrations table {})",
            address.path,
            address
                .migrations_table
                .as_ref()
                .map_or(dm_core::DEFAULT_MIGRATIONS_TABLE, |t| t.as_str())
        );

        Self::with_instance(
            pool,
            Some(DriverConfig {
                migrations_table: address.migrations_table,
                database_name: Some(address.path),
            }),
        )
    }

    /// Open a driver on a fresh in-memory database.
    pub fn in_memory() -> DbResult<Self> {
        Self::open("duckdb://:memory:")
    }

    /// Create the version table and its unique index if missing.
    ///
    /// Needed again after [`drop_all`](Driver::drop_all) to resume tracking.
    pub fn ensure_version_table(&self) -> DbResult<()> {
        let mut sql = String::new();
        if let Some(schema) = self.table.schema() {
            sql.push_str(&format!("CREATE SCHEMA IF NOT EXISTS {};\n", quote_ident(schema)));
        }
        sql.push_str(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (version BIGINT, dirty BOOLEAN);\n\
             CREATE UNIQUE INDEX IF NOT EXISTS {index} ON {table} (version);",
            table = self.table.quoted(),
            index = self.table.quoted_index_name(),
        ));

        debug!("Ensuring version table {}", self.table);
        let conn = self.pool.get()?;
        conn.execute_batch(&sql)
            .map_err(|e| DbError::query(sql.as_str(), e))
    }

    /// Name of the table holding the version record.
    pub fn migrations_table(&self) -> &MigrationsTable {
        &self.table
    }

    /// Database location this driver was opened with, if known.
    pub fn database_name(&self) -> Option<&str> {
        self.database_name.as_deref()
    }

    /// Borrow the underlying connection pool.
    pub fn pool(&self) -> &DuckDbPool {
        &self.pool
    }

    /// Whether the migration lock is currently held.
    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    /// Release this driver's handle on the pool.
    pub fn close(self) -> DbResult<()> {
        if self.lock.is_locked() {
            warn!(
                "Closing version store {} while the migration lock is held",
                self.database_name.as_deref().unwrap_or("<unknown>")
            );
        }
        debug!("Closing version store");
        drop(self.pool);
        Ok(())
    }
}

impl Driver for DuckDbDriver {
    fn lock(&self) -> DbResult<()> {
        self.lock.acquire()?;
        debug!("Acquired migration lock");
        Ok(())
    }

    fn unlock(&self) -> DbResult<()> {
        self.lock.release()?;
        debug!("Released migration lock");
        Ok(())
    }

    fn run(&self, script: &str) -> DbResult<()> {
        if script.trim().is_empty() {
            debug!("Skipping empty migration script");
            return Ok(());
        }
        debug!("Running migration script ({} bytes)", script.len());
        let conn = self.pool.get()?;
        conn.execute_batch(script)
            .map_err(|e| DbError::query(script, e))
    }

    fn set_version(&self, version: i64, dirty: bool) -> DbResult<()> {
        let state = VersionState::new(version, dirty);
        let table = self.table.quoted();
        debug!("Setting version to {state}");

        let conn = self.pool.get()?;
        with_transaction(&conn, |conn| {
            let delete = format!("DELETE FROM {table}");
            conn.execute(&delete, [])
                .map_err(|e| DbError::query(delete.as_str(), e))?;

            if state.needs_row() {
                let insert = format!("INSERT INTO {table} (version, dirty) VALUES (?, ?)");
                conn.execute(&insert, duckdb::params![state.version, state.dirty])
                    .map_err(|e| DbError::query(insert.as_str(), e))?;
            }
            Ok(())
        })
    }

    fn version(&self) -> DbResult<VersionState> {
        let query = format!(
            "SELECT version, dirty FROM {} LIMIT 1",
            self.table.quoted()
        );
        let read_err = |e| DbError::query_at(1, query.as_str(), e);

        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&query).map_err(read_err)?;
        let mut rows = stmt.query([]).map_err(read_err)?;
        let state = match rows.next().map_err(read_err)? {
            Some(row) => {
                let version: i64 = row.get(0).map_err(read_err)?;
                let dirty: bool = row.get(1).map_err(read_err)?;
                VersionState::new(version, dirty)
            }
            None => VersionState::NIL,
        };
        Ok(state)
    }

    fn drop_all(&self) -> DbResult<()> {
        let conn = self.pool.get()?;
        let tables = catalog_tables(&conn)?;
        if tables.is_empty() {
            debug!("No tables to drop");
            return Ok(());
        }

        let total = tables.len();
        let mut remaining = tables;
        // A table referenced by a foreign key can only go after its referrers,
        // so retry the blocked tables until a pass drops nothing.
        while !remaining.is_empty() {
            let pass_size = remaining.len();
            let mut blocked = Vec::new();
            let mut last_err = None;
            for table in remaining {
                let query = format!("DROP TABLE {}", table.quoted());
                match conn.execute_batch(&query) {
                    Ok(()) => debug!("Dropped table {table}"),
                    Err(e) => {
                        debug!("Deferring drop of {table}: {e}");
                        last_err = Some(DbError::query(query.as_str(), e));
                        blocked.push(table);
                    }
                }
            }
            if let Some(err) = last_err {
                if blocked.len() == pass_size {
                    return Err(err);
                }
            }
            remaining = blocked;
        }

        let query = "CHECKPOINT";
        conn.execute_batch(query)
            .map_err(|e| DbError::query(query, e))?;
        info!("Dropped {total} table(s)");
        Ok(())
    }

    fn table_names(&self) -> DbResult<Vec<CatalogTable>> {
        let conn = self.pool.get()?;
        catalog_tables(&conn)
    }

    fn close(self: Box<Self>) -> DbResult<()> {
        DuckDbDriver::close(*self)
    }

    fn db_type(&self) -> &'static str {
        SCHEME
    }
}

/// Build the connection pool for a parsed address.
///
/// Non-driver query parameters become DuckDB configuration options.
fn open_pool(address: &Address) -> DbResult<DuckDbPool> {
    let mut config = duckdb::Config::default();
    for (key, value) in &address.options {
        config = config.with(key, value).map_err(|e| {
            DbError::ConnectionError(format!("invalid option {key}={value}: {e}"))
        })?;
    }

    let manager = if address.is_memory() {
        DuckdbConnectionManager::memory_with_flags(config)
    } else {
        DuckdbConnectionManager::file_with_flags(&address.path, config)
    }
    .map_err(|e| DbError::ConnectionError(format!("{e}: {}", address.path)))?;

    let pool = r2d2::Pool::builder()
        .max_size(address.pool_size.unwrap_or(DEFAULT_POOL_SIZE))
        .build(manager)?;
    Ok(pool)
}

/// Read the user tables of the current database from the catalog.
fn catalog_tables(conn: &Connection) -> DbResult<Vec<CatalogTable>> {
    let query = "SELECT table_schema, table_name FROM information_schema.tables \
                 WHERE table_type = 'BASE TABLE' AND table_catalog = current_database() \
                 ORDER BY table_schema, table_name";
    let mut stmt = conn
        .prepare(query)
        .map_err(|e| DbError::query(query, e))?;
    let tables = stmt
        .query_map([], |row| {
            Ok(CatalogTable {
                schema: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .map_err(|e| DbError::query(query, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| DbError::query(query, e))?;

    Ok(tables
        .into_iter()
        .filter(|t| !t.name.is_empty())
        .collect())
}

/// Run `body` as one unit of work on `conn`.
///
/// Commits if `body` returns `Ok`. Anything else, including a failed
/// `COMMIT`, leaves the database as it was before the call.
fn with_transaction<F, T>(conn: &Connection, body: F) -> DbResult<T>
where
    F: FnOnce(&Connection) -> DbResult<T>,
{
    conn.execute_batch("BEGIN TRANSACTION")
        .map_err(|e| DbError::query("BEGIN TRANSACTION", e))?;

    let result = body(conn);

    match &result {
        Ok(_) => {
            if let Err(commit_err) = conn.execute_batch("COMMIT") {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(DbError::query("COMMIT", commit_err));
            }
        }
        Err(_) => {
            let _ = conn.execute_batch("ROLLBACK");
        }
    }
    result
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
