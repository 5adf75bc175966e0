//! Database address parsing.
//!
//! An address has the form `scheme://path[?key=value&...]`. Query keys
//! starting with `x-` configure the migration driver itself and are removed
//! before the store is opened; every other key is handed to the store as a
//! connection option.
//!
//! The path is taken literally. Percent escapes are decoded in query values
//! only, so `duckdb://my%20db.duckdb` names a file called `my%20db.duckdb`.

use crate::error::{CoreError, CoreResult};
use crate::migrations_table::MigrationsTable;

/// Query parameter overriding the migrations table name.
pub const PARAM_MIGRATIONS_TABLE: &str = "x-migrations-table";

/// Query parameter overriding the maximum pool size.
pub const PARAM_POOL_SIZE: &str = "x-pool-size";

/// Path value selecting an in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// A parsed database address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Driver scheme, lower-cased (e.g. `duckdb`)
    pub scheme: String,
    /// Store location with driver parameters removed, not percent-decoded
    pub path: String,
    /// `x-migrations-table` override
    pub migrations_table: Option<MigrationsTable>,
    /// `x-pool-size` override
    pub pool_size: Option<u32>,
    /// Remaining query parameters, in order of appearance
    pub options: Vec<(String, String)>,
}

impl Address {
    /// Parse a full address.
    pub fn parse(address: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        };

        let scheme = scheme_of(address)?;
        let rest = &address[scheme.len() + "://".len()..];
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };
        if path.is_empty() {
            return Err(invalid("missing database path"));
        }

        let mut parsed = Address {
            scheme: scheme.to_ascii_lowercase(),
            path: path.to_string(),
            migrations_table: None,
            pool_size: None,
            options: Vec::new(),
        };

        let Some(query) = query else {
            return Ok(parsed);
        };

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                PARAM_MIGRATIONS_TABLE => {
                    parsed.migrations_table = Some(MigrationsTable::parse_or_default(&value)?);
                }
                PARAM_POOL_SIZE => {
                    let size = value
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| {
                            invalid(&format!(
                                "{PARAM_POOL_SIZE} must be a positive integer, got '{value}'"
                            ))
                        })?;
                    parsed.pool_size = Some(size);
                }
                k if k.starts_with("x-") => {
                    log::debug!("Ignoring unknown driver parameter '{k}'");
                }
                _ => parsed
                    .options
                    .push((key.into_owned(), value.into_owned())),
            }
        }
        Ok(parsed)
    }

    /// Whether the address points at an in-memory database.
    pub fn is_memory(&self) -> bool {
        self.path == MEMORY_PATH
    }
}

/// Extract the scheme of an address without parsing the rest.
pub fn scheme_of(address: &str) -> CoreResult<&str> {
    let invalid = |reason: &str| CoreError::InvalidAddress {
        address: address.to_string(),
        reason: reason.to_string(),
    };

    let (scheme, _) = address
        .split_once("://")
        .ok_or_else(|| invalid("expected 'scheme://path'"))?;

    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return Err(invalid("scheme must start with a letter")),
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return Err(invalid("scheme contains invalid characters"));
    }
    Ok(scheme)
}

#[cfg(test)]
#[path = "address_test.rs"]
mod tests;
