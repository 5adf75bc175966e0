//! Error types for dm-db

use dm_core::CoreError;
use thiserror::Error;

/// Version store errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Driver constructed without a configuration (D001)
    #[error("[D001] No driver config provided")]
    ConfigMissing,

    /// Lock already held by another migration sequence (D002)
    #[error("[D002] Database is already locked")]
    AlreadyLocked,

    /// Unlock called without a matching lock (D003)
    #[error("[D003] Database is not locked")]
    NotLocked,

    /// Statement failed against the store (D004)
    #[error("[D004] {}", format_query_error(.line, .query, .source))]
    QueryError {
        /// 1-based line within `query`, when known
        line: Option<u32>,
        /// Statement or script text that failed
        query: String,
        #[source]
        source: duckdb::Error,
    },

    /// Failed to open the store (D005)
    #[error("[D005] Database connection failed: {0}")]
    ConnectionError(String),

    /// No connection could be taken from the pool (D006)
    #[error("[D006] Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// No driver registered for an address scheme (D007)
    #[error("[D007] No driver registered for scheme '{scheme}'")]
    UnsupportedScheme { scheme: String },

    /// Migration script could not be read (D008)
    #[error("[D008] Failed to read migration: {0}")]
    Io(#[from] std::io::Error),

    /// Address or configuration error from dm-core
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

/// Longest query excerpt included in an error message.
const QUERY_EXCERPT_LEN: usize = 200;

fn format_query_error(line: &Option<u32>, query: &str, source: &duckdb::Error) -> String {
    let mut excerpt: String = query.trim().chars().take(QUERY_EXCERPT_LEN).collect();
    if query.trim().chars().count() > QUERY_EXCERPT_LEN {
        excerpt.push_str("...");
    }
    match line {
        Some(line) => format!("Query failed at line {line}: {source} in: {excerpt}"),
        None => format!("Query failed: {source} in: {excerpt}"),
    }
}

impl DbError {
    /// Wrap a store error together with the statement that caused it.
    pub(crate) fn query(query: impl Into<String>, source: duckdb::Error) -> Self {
        DbError::QueryError {
            line: None,
            query: query.into(),
            source,
        }
    }

    /// Like [`query`](Self::query), with a known line number.
    pub(crate) fn query_at(line: u32, query: impl Into<String>, source: duckdb::Error) -> Self {
        DbError::QueryError {
            line: Some(line),
            query: query.into(),
            source,
        }
    }
}
