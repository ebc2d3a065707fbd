//! Liveness check.

use super::response::respond_success;
use crate::{app::AppState, models::health::health_data::HealthData};
use axum::{extract::State, response::Response};
use chrono::{SecondsFormat, Utc};

pub async fn health(State(state): State<AppState>) -> Response {
  respond_success(HealthData {
    status: "healthy",
    timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    uptime: state.started_at.elapsed().as_secs_f64(),
    service: state.service_name.to_string(),
  })
}
