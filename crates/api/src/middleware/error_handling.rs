//! # Error Handling Middleware
//!
//! Maps [`SlotError`] to HTTP status codes and a JSON body of the form
//! `{"error": "<message>"}`, so every route reports failures the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use recurslot_core::errors::SlotError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use recurslot_api::middleware::error_handling::AppError;
/// use recurslot_core::errors::SlotError;
///
/// async fn handler(days: Vec<String>) -> Result<Json<usize>, AppError> {
///     if days.is_empty() {
///         return Err(SlotError::Validation("At least one weekday is required".into()).into());
///     }
///     Ok(Json(days.len()))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SlotError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SlotError::NotFound(_) => StatusCode::NOT_FOUND,
            SlotError::Validation(_) => StatusCode::BAD_REQUEST,
            SlotError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SlotError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            SlotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError(err)
    }
}

/// Allows `?` on `eyre::Result` inside handlers; treated as a store failure.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SlotError::Database(err))
    }
}

/// Turns errors raised by the tower middleware stack into JSON responses.
pub async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        let body = Json(json!({ "error": "Request timed out" }));
        return (StatusCode::REQUEST_TIMEOUT, body).into_response();
    }

    AppError(SlotError::Internal(err)).into_response()
}
