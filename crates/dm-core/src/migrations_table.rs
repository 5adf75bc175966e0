//! Validated name of the table holding the version record.

use crate::error::{CoreError, CoreResult};
use crate::sql_utils::{quote_ident, quote_schema_table};
use crate::version::DEFAULT_MIGRATIONS_TABLE;
use serde::Serialize;
use std::fmt;
use std::ops::Deref;

/// Name of the migrations table, optionally schema-qualified (`schema.table`).
///
/// Each component must be a plain identifier: ASCII alphanumerics and `_`,
/// not starting with a digit. Distinct names let several migration tracks
/// share one database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MigrationsTable(String);

impl MigrationsTable {
    /// Validate and wrap a table name.
    pub fn parse(name: impl Into<String>) -> CoreResult<Self> {
        let name = name.into();
        let invalid = |reason: &str| CoreError::InvalidTableName {
            name: name.clone(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        let parts: Vec<&str> = name.split('.').collect();
        if parts.len() > 2 {
            return Err(invalid("expected 'table' or 'schema.table'"));
        }
        for part in &parts {
            if part.is_empty() {
                return Err(invalid("empty name component"));
            }
            if part.starts_with(|c: char| c.is_ascii_digit()) {
                return Err(invalid("name component starts with a digit"));
            }
            if !part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(invalid(
                    "only ASCII letters, digits and underscores are allowed",
                ));
            }
        }
        Ok(Self(name))
    }

    /// Like [`parse`](Self::parse), but an empty name means the default.
    pub fn parse_or_default(name: &str) -> CoreResult<Self> {
        if name.is_empty() {
            Ok(Self::default())
        } else {
            Self::parse(name)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Schema component, if the name is qualified.
    pub fn schema(&self) -> Option<&str> {
        self.0.split_once('.').map(|(schema, _)| schema)
    }

    /// Unqualified table component.
    pub fn table(&self) -> &str {
        self.0
            .split_once('.')
            .map_or(self.0.as_str(), |(_, table)| table)
    }

    /// The name quoted for use in SQL text.
    pub fn quoted(&self) -> String {
        match self.schema() {
            Some(schema) => quote_schema_table(schema, self.table()),
            None => quote_ident(self.table()),
        }
    }

    /// Name of the unique index on `version`, already quoted.
    ///
    /// DuckDB index names live in the table's schema, so the index is
    /// unqualified and derived from the table component only.
    pub fn quoted_index_name(&self) -> String {
        quote_ident(&format!("{}_version_unique", self.table()))
    }
}

impl Default for MigrationsTable {
    fn default() -> Self {
        Self(DEFAULT_MIGRATIONS_TABLE.to_string())
    }
}

impl fmt::Display for MigrationsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MigrationsTable {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for MigrationsTable {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MigrationsTable {
    type Error = CoreError;
    fn try_from(s: String) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for MigrationsTable {
    type Error = CoreError;
    fn try_from(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl<'de> serde::Deserialize<'de> for MigrationsTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MigrationsTable::parse(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "migrations_table_test.rs"]
mod tests;
