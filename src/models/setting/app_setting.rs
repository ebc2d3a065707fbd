//! Key/value application setting.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AppSetting {
    pub key: String,
    /// JSON-encoded value.
    pub value: Option<String>,
    pub updated_at: Option<String>,
}
