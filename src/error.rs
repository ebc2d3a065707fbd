//! Crate error type.

use thiserror::Error;

/// Errors surfaced by the log store, query service and runtime.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// SQLite could not acquire a lock within the configured busy timeout.
    #[error("Database busy: {0}")]
    Busy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid listen address: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    /// Classify a sqlx error, separating lock-wait failures from the rest.
    pub fn from_db(err: sqlx::Error) -> Self {
        let busy = err
            .as_database_error()
            .and_then(|d| d.code())
            .map(|code| is_busy_code(&code))
            .unwrap_or(false);
        if busy {
            Error::Busy(err.to_string())
        } else {
            Error::Database(err)
        }
    }

    /// Whether the caller may simply retry the operation later.
    pub fn is_busy(&self) -> bool {
        matches!(self, Error::Busy(_))
    }
}

// SQLITE_BUSY (5) and SQLITE_LOCKED (6), including their extended codes.
fn is_busy_code(code: &str) -> bool {
    code.parse::<i32>()
        .map(|c| matches!(c & 0xff, 5 | 6))
        .unwrap_or(false)
}

/// Result alias for logvault operations.
pub type Result<T> = std::result::Result<T, Error>;
