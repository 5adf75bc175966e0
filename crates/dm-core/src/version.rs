//! Migration version state as persisted in the version table.

use std::fmt;

/// Sentinel version meaning "no migration has been applied".
pub const NIL_VERSION: i64 = -1;

/// Table name used when no override is configured.
pub const DEFAULT_MIGRATIONS_TABLE: &str = "schema_migrations";

/// The single version record: last applied migration plus its dirty flag.
///
/// A dirty state means a migration was started but never confirmed, so the
/// schema may be half-applied. It is durable and must be resolved by an
/// operator (usually by forcing a known-good version).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionState {
    /// Applied version, or [`NIL_VERSION`]
    pub version: i64,
    /// Whether the last migration was left incomplete
    pub dirty: bool,
}

impl VersionState {
    /// Clean state with no applied migrations.
    pub const NIL: VersionState = VersionState {
        version: NIL_VERSION,
        dirty: false,
    };

    pub fn new(version: i64, dirty: bool) -> Self {
        Self { version, dirty }
    }

    /// True when no migration has been recorded.
    pub fn is_nil(&self) -> bool {
        self.version == NIL_VERSION
    }

    /// Whether `set_version(version, dirty)` writes a row at all.
    ///
    /// A clean nil state is represented by an empty table, but a dirty nil
    /// state must be stored so a restart can see it.
    pub fn needs_row(&self) -> bool {
        self.version >= 0 || (self.version == NIL_VERSION && self.dirty)
    }
}

impl Default for VersionState {
    fn default() -> Self {
        Self::NIL
    }
}

impl fmt::Display for VersionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            f.write_str("nil")?;
        } else {
            write!(f, "{}", self.version)?;
        }
        if self.dirty {
            f.write_str(" (dirty)")?;
        }
        Ok(())
    }
}
