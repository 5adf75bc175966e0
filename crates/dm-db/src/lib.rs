//! dm-db - Migration version store for duckmigrate
//!
//! This crate provides the `Driver` trait, its DuckDB implementation, and
//! the scheme-based registry used to open a driver from an address.

pub mod duckdb;
pub mod error;
pub mod lock;
pub mod registry;
pub mod traits;

pub use crate::duckdb::{DriverConfig, DuckDbDriver, DuckDbPool};
pub use error::{DbError, DbResult};
pub use lock::MigrationLock;
pub use registry::{DriverFactory, DriverRegistry};
pub use traits::{CatalogTable, Driver};
