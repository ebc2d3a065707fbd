//! Generic key/value settings table.

use crate::{
    error::{Error, Result},
    models::setting::app_setting::AppSetting,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::SqlitePool;

#[derive(Clone, Debug)]
pub struct SettingsStore {
    pool: SqlitePool,
}

impl SettingsStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create or overwrite `key`, refreshing its timestamp.
    pub async fn set(&self, key: &str, value: &Value) -> Result<AppSetting> {
        let encoded = serde_json::to_string(value)?;
        sqlx::query_as::<_, AppSetting>(
            "INSERT INTO app_settings (key, value, updated_at) \
             VALUES (?, ?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now')) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at \
             RETURNING key, value, updated_at",
        )
        .bind(key)
        .bind(encoded)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::from_db)
    }

    pub async fn get(&self, key: &str) -> Result<Option<AppSetting>> {
        sqlx::query_as::<_, AppSetting>(
            "SELECT key, value, updated_at FROM app_settings WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::from_db)
    }

    /// Decoded value of `key`; `None` when the key or its value is absent.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key).await?.and_then(|s| s.value) {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let done = sqlx::query("DELETE FROM app_settings WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(Error::from_db)?;
        Ok(done.rows_affected() > 0)
    }

    pub async fn list(&self) -> Result<Vec<AppSetting>> {
        sqlx::query_as::<_, AppSetting>("SELECT key, value, updated_at FROM app_settings ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::from_db)
    }
}
