//! Logs API: filtered listing and manual clear.

use super::response::{respond_error, respond_success, status_for};
use crate::{
  app::AppState,
  logs::{LogFilters, clear_all, query_logs},
  models::response::api_response::MessageData,
};
use axum::{
  extract::{Query, State},
  response::Response,
};

/// `GET /api/logs?search=&levels=&levels=&limit=`
pub async fn list_logs(
  State(state): State<AppState>,
  Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
  let filters = LogFilters::from_query_pairs(&pairs);
  match query_logs(&state.store, &filters).await {
    Ok(rows) => respond_success(rows),
    Err(e) => respond_error(&state, format!("Error in /api/logs: {e}"), status_for(&e)).await,
  }
}

/// `POST /api/clear-log`
pub async fn clear_log(State(state): State<AppState>) -> Response {
  match clear_all(&state.store, &state.logger).await {
    Ok(_) => respond_success(MessageData {
      message: "Log cleared".to_string(),
    }),
    Err(e) => respond_error(&state, format!("Failed to clear log: {e}"), status_for(&e)).await,
  }
}
