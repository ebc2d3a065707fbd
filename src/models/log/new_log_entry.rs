//! Insert payload for a log row.

use super::level::Level;
use serde_json::Value;

/// A log event not yet persisted. `id` is assigned by the store and
/// `created_at` defaults to the insert time.
#[derive(Debug, Clone)]
pub struct NewLogEntry {
    pub level: Level,
    pub message: String,
    pub source: Option<String>,
    pub meta: Option<Value>,
    pub created_at: Option<String>,
}

impl NewLogEntry {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            source: None,
            meta: None,
            created_at: None,
        }
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }
}
