//! Logger: single funnel for emitting an event from anywhere in the process.
//!
//! Every event is printed to stdout first, then persisted to the log store.
//! Persistence is best-effort; a failed write is reported on the console and
//! never handed back to the caller.

use crate::{
    db::logs::LogStore,
    models::log::{level::Level, new_log_entry::NewLogEntry},
};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::error;

/// Optional fields attached to an event.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub source: Option<String>,
    pub meta: Option<Value>,
}

impl LogOptions {
    pub fn source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// Explicit logging handle, cloned into whatever needs to emit events.
#[derive(Clone, Debug)]
pub struct Logger {
    store: LogStore,
}

impl Logger {
    pub fn new(store: LogStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &LogStore {
        &self.store
    }

    pub async fn log(&self, level: Level, message: &str, options: LogOptions) {
        println!("{}", console_line(level, message));

        let entry = NewLogEntry {
            level,
            message: message.to_string(),
            source: options.source,
            meta: options.meta,
            created_at: None,
        };
        if let Err(e) = self.store.insert(&entry).await {
            error!("failed to write log to database: {e}");
        }
    }

    pub async fn info(&self, message: &str, options: LogOptions) {
        self.log(Level::Info, message, options).await
    }

    pub async fn warn(&self, message: &str, options: LogOptions) {
        self.log(Level::Warn, message, options).await
    }

    pub async fn error(&self, message: &str, options: LogOptions) {
        self.log(Level::Error, message, options).await
    }

    pub async fn debug(&self, message: &str, options: LogOptions) {
        self.log(Level::Debug, message, options).await
    }
}

/// `2024-05-01T10:00:00.000Z [INFO] message`
fn console_line(level: Level, message: &str) -> String {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    format!(
        "{} [{}] {}",
        timestamp,
        level.as_str().to_ascii_uppercase(),
        message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_pool;
    use serde_json::json;

    #[test]
    fn console_line_has_timestamp_and_upper_level() {
        let line = console_line(Level::Warn, "disk almost full");
        let (timestamp, rest) = line.split_once(' ').unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert_eq!(rest, "[WARN] disk almost full");
    }

    #[tokio::test]
    async fn shorthands_persist_with_their_level() {
        let (_dir, pool) = temp_pool().await;
        let logger = Logger::new(LogStore::new(pool));

        logger.info("i", LogOptions::default()).await;
        logger.warn("w", LogOptions::default()).await;
        logger.error("e", LogOptions::source("worker").with_meta(json!({"job": 7}))).await;
        logger.debug("d", LogOptions::default()).await;

        let rows = logger.store().fetch_recent(&Level::ALL, 10).await.unwrap();
        assert_eq!(rows.len(), 4);
        let error_row = rows.iter().find(|r| r.level == Level::Error).unwrap();
        assert_eq!(error_row.message, "e");
        assert_eq!(error_row.source.as_deref(), Some("worker"));
        assert_eq!(error_row.meta.as_deref(), Some(r#"{"job":7}"#));
        for level in Level::ALL {
            assert_eq!(rows.iter().filter(|r| r.level == level).count(), 1);
        }
    }

    #[tokio::test]
    async fn store_failure_is_swallowed() {
        let (_dir, pool) = temp_pool().await;
        let logger = Logger::new(LogStore::new(pool.clone()));
        pool.close().await;

        // Must return normally even though nothing can be written.
        logger.error("lost event", LogOptions::default()).await;
        assert!(logger.store().count().await.is_err());
    }
}
