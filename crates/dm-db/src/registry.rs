//! Scheme-based driver lookup.

use crate::duckdb::{DuckDbDriver, SCHEME as DUCKDB_SCHEME};
use crate::error::{DbError, DbResult};
use crate::traits::Driver;
use dm_core::address::scheme_of;
use std::collections::HashMap;

/// Constructor opening a driver from a full address.
pub type DriverFactory = fn(&str) -> DbResult<Box<dyn Driver>>;

/// Lookup table from address scheme to driver factory.
///
/// Built once at startup and passed to whatever needs to open drivers.
#[derive(Clone, Default)]
pub struct DriverRegistry {
    factories: HashMap<String, DriverFactory>,
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in driver.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(DUCKDB_SCHEME, open_duckdb);
        registry
    }

    /// Register a factory for `scheme`, returning the one it replaces.
    pub fn register(&mut self, scheme: &str, factory: DriverFactory) -> Option<DriverFactory> {
        self.factories.insert(scheme.to_ascii_lowercase(), factory)
    }

    /// Registered schemes, sorted.
    pub fn schemes(&self) -> Vec<&str> {
        let mut schemes: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        schemes.sort_unstable();
        schemes
    }

    /// Open a driver for `address` using the factory registered for its scheme.
    pub fn open(&self, address: &str) -> DbResult<Box<dyn Driver>> {
        let scheme = scheme_of(address)?.to_ascii_lowercase();
        let factory = self
            .factories
            .get(&scheme)
            .ok_or(DbError::UnsupportedScheme { scheme })?;
        factory(address)
    }
}

fn open_duckdb(address: &str) -> DbResult<Box<dyn Driver>> {
    Ok(Box::new(DuckDbDriver::open(address)?))
}
