//! Configuration types and parsing for duckmigrate.yml

use crate::error::{CoreError, CoreResult};
use crate::migrations_table::MigrationsTable;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable consulted for the database address.
pub const DATABASE_ENV_VAR: &str = "DM_DATABASE_URL";

/// File names searched by [`Config::load_from_dir`], in order.
const CONFIG_FILE_NAMES: &[&str] = &["duckmigrate.yml", "duckmigrate.yaml"];

/// Optional project configuration from duckmigrate.yml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database address, e.g. `duckdb://./app.duckdb`
    #[serde(default)]
    pub database: Option<String>,

    /// Table holding the version record
    #[serde(default)]
    pub migrations_table: Option<MigrationsTable>,
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory.
    /// Looks for duckmigrate.yml or duckmigrate.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        Err(CoreError::ConfigNotFound {
            path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
        })
    }

    fn validate(&self) -> CoreResult<()> {
        if let Some(database) = &self.database {
            if database.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: "database address cannot be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Resolve the database address.
    ///
    /// Priority: CLI flag > `DM_DATABASE_URL` env var > config file.
    pub fn resolve_database(&self, cli_database: Option<&str>) -> Option<String> {
        if let Some(db) = cli_database {
            return Some(db.to_string());
        }
        if let Ok(db) = std::env::var(DATABASE_ENV_VAR) {
            if !db.is_empty() {
                return Some(db);
            }
        }
        self.database.clone()
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
