//! Shared utilities for CLI commands

use anyhow::{bail, Context, Result};
use dm_core::address::PARAM_MIGRATIONS_TABLE;
use dm_core::{Address, Config, CoreError, MigrationsTable};
use dm_db::{Driver, DriverRegistry};
use log::{debug, warn};
use std::path::Path;

use crate::cli::GlobalArgs;

/// Load the config named by `--config`, or `duckmigrate.yml` from the
/// current directory when one exists.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    if let Some(path) = &global.config {
        return Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    match Config::load_from_dir(Path::new(".")) {
        Ok(config) => Ok(config),
        Err(CoreError::ConfigNotFound { .. }) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e).context("Failed to load config"),
    }
}

/// Work out the full driver address from the CLI flags, the environment and
/// the config file.
///
/// `--migrations-table` always wins. A table from the config file is only
/// applied when the address does not already name one.
pub(crate) fn resolve_address(global: &GlobalArgs, config: &Config) -> Result<String> {
    let Some(address) = config.resolve_database(global.database.as_deref()) else {
        bail!(
            "No database address. Pass --database, set {} or add `database:` to duckmigrate.yml",
            dm_core::config::DATABASE_ENV_VAR
        );
    };

    let table = match &global.migrations_table {
        Some(name) => Some(MigrationsTable::parse(name.as_str())?),
        None => {
            let parsed = Address::parse(&address)?;
            match (&parsed.migrations_table, &config.migrations_table) {
                (None, Some(table)) => Some(table.clone()),
                _ => None,
            }
        }
    };

    Ok(match table {
        Some(table) => with_query_param(&address, PARAM_MIGRATIONS_TABLE, table.as_str()),
        None => address,
    })
}

// Later parameters override earlier ones when the address is parsed.
fn with_query_param(address: &str, key: &str, value: &str) -> String {
    let separator = if address.contains('?') { '&' } else { '?' };
    format!("{address}{separator}{key}={value}")
}

/// Resolve the address and open a driver for it.
pub(crate) fn open_driver(global: &GlobalArgs) -> Result<Box<dyn Driver>> {
    let config = load_config(global)?;
    let address = resolve_address(global, &config)?;
    debug!("Opening {address}");

    DriverRegistry::with_defaults()
        .open(&address)
        .with_context(|| format!("Failed to open {address}"))
}

/// Run `body` while holding the migration lock.
///
/// The lock is released whether or not `body` succeeds. An unlock failure is
/// only reported when `body` itself succeeded.
pub(crate) fn with_lock<T>(
    driver: &dyn Driver,
    body: impl FnOnce(&dyn Driver) -> Result<T>,
) -> Result<T> {
    driver.lock().context("Failed to acquire migration lock")?;
    let result = body(driver);
    match driver.unlock() {
        Ok(()) => result,
        Err(e) if result.is_err() => {
            warn!("Failed to release migration lock: {e}");
            result
        }
        Err(e) => Err(e).context("Failed to release migration lock"),
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
