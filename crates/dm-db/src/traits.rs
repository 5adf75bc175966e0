//! Driver trait definition

use crate::error::DbResult;
use dm_core::sql_utils::quote_schema_table;
use dm_core::VersionState;
use std::fmt;
use std::io::Read;

/// A user table found in the database catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CatalogTable {
    pub schema: String,
    pub name: String,
}

impl CatalogTable {
    /// `"schema"."name"`, ready for SQL text.
    pub fn quoted(&self) -> String {
        quote_schema_table(&self.schema, &self.name)
    }
}

impl fmt::Display for CatalogTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

/// Version store driver used by a migration orchestrator.
///
/// The expected call sequence for one migration is
/// `lock` → `version` → `set_version(v, true)` → `run` →
/// `set_version(v, false)` → `unlock`. The driver does not enforce that
/// sequence; it only guarantees that `lock` is exclusive and that each call
/// is individually safe to make from any thread.
pub trait Driver: Send + Sync {
    /// Take the in-process migration lock without waiting.
    fn lock(&self) -> DbResult<()>;

    /// Release the migration lock.
    fn unlock(&self) -> DbResult<()>;

    /// Execute a raw migration script, which may hold several statements.
    fn run(&self, script: &str) -> DbResult<()>;

    /// Read a migration script to the end and execute it.
    fn run_reader(&self, migration: &mut dyn Read) -> DbResult<()> {
        let mut script = String::new();
        migration.read_to_string(&mut script)?;
        self.run(&script)
    }

    /// Replace the version record.
    fn set_version(&self, version: i64, dirty: bool) -> DbResult<()>;

    /// Read the version record; [`VersionState::NIL`] when none is stored.
    fn version(&self) -> DbResult<VersionState>;

    /// Drop every table in the database, including the version table.
    fn drop_all(&self) -> DbResult<()>;

    /// User tables of the current database, sorted by schema and name.
    fn table_names(&self) -> DbResult<Vec<CatalogTable>>;

    /// Release the underlying connections.
    fn close(self: Box<Self>) -> DbResult<()>;

    /// Driver type identifier for logging
    fn db_type(&self) -> &'static str;
}
