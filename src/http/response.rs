//! Response envelope helpers.

use crate::{
  app::AppState,
  error::Error,
  logs::LogOptions,
  models::response::api_response::ApiResponse,
};
use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;

/// `200 {success: true, data}`.
pub fn respond_success<T: Serialize>(data: T) -> Response {
  (StatusCode::OK, Json(ApiResponse::ok(data))).into_response()
}

/// `{success: false, error}` with `status`. Nothing is recorded.
pub fn respond_failure(message: String, status: StatusCode) -> Response {
  (status, Json(ApiResponse::failure(message))).into_response()
}

/// Record `message` at error level, then answer `{success: false, error}`.
pub async fn respond_error(state: &AppState, message: String, status: StatusCode) -> Response {
  state.logger.error(&message, LogOptions::default()).await;
  respond_failure(message, status)
}

/// Lock-wait failures are retryable by the client; everything else is a 500.
pub fn status_for(err: &Error) -> StatusCode {
  if err.is_busy() {
    StatusCode::SERVICE_UNAVAILABLE
  } else {
    StatusCode::INTERNAL_SERVER_ERROR
  }
}
