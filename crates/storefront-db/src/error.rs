//! # Storage Errors
//!
//! ```text
//! sqlx::Error ──────────┐
//! MigrateError ─────────┼──► DbError ──► ApiError (apps/storefront)
//! serde_json (on save) ─┘
//! ```
//!
//! Unreadable stored JSON is not an error on the load path: the collection
//! repository falls back to defaults. Encoding only fails on save.

use thiserror::Error;

// SQLite primary result codes (the low byte of an extended code).
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;
const SQLITE_FULL: i32 = 13;

/// Errors from the storefront database.
#[derive(Debug, Error)]
pub enum DbError {
    /// The file could not be opened, or the pool is closed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Another connection or process holds the write lock.
    #[error("Database is busy: {0}")]
    Busy(String),

    /// The disk (or a size limit) refused the write.
    #[error("Storage is full: {0}")]
    StorageFull(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Timed out waiting for a pooled connection.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A collection could not be encoded for storage.
    #[error("Could not encode collection '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Wraps an encode failure for the collection stored under `key`.
    pub fn serialization(key: impl Into<String>, source: serde_json::Error) -> Self {
        DbError::Serialization {
            key: key.into(),
            source,
        }
    }

    /// Whether retrying the same write later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, DbError::Busy(_) | DbError::PoolExhausted)
    }
}

fn primary_code(code: Option<&str>) -> Option<i32> {
    code.and_then(|c| c.parse::<i32>().ok()).map(|c| c & 0xff)
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match primary_code(db_err.code().as_deref()) {
                    Some(SQLITE_BUSY) | Some(SQLITE_LOCKED) => DbError::Busy(message),
                    Some(SQLITE_FULL) => DbError::StorageFull(message),
                    _ => DbError::QueryFailed(message),
                }
            }
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),
            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;
