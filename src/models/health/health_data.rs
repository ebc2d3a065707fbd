//! Health check payload.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct HealthData {
    pub status: &'static str,
    pub timestamp: String,
    /// Seconds since the process started.
    pub uptime: f64,
    pub service: String,
}
