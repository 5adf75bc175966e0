//! dm-core - Core types for duckmigrate
//!
//! Shared, database-independent pieces: the version record model, the
//! validated migrations table name, database address parsing, and project
//! configuration.

pub mod address;
pub mod config;
pub mod error;
pub mod migrations_table;
pub mod sql_utils;
pub mod version;

pub use address::Address;
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use migrations_table::MigrationsTable;
pub use version::{VersionState, DEFAULT_MIGRATIONS_TABLE, NIL_VERSION};
