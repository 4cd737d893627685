//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the Kabinet
//! API. It maps engine errors to appropriate HTTP status codes and JSON
//! error responses, ensuring a consistent error handling experience across
//! the entire API.
//!
//! The implementation is based on Axum's error handling mechanisms and
//! integrates with the engine's error taxonomy.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kabinet_core::errors::EngineError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps [`EngineError`] instances and implements `IntoResponse`
/// to convert them into HTTP responses with appropriate status codes and
/// JSON payloads.
///
/// ```ignore
/// async fn handler(id: String) -> Result<Json<BookingRecord>, AppError> {
///     let booking = service.confirm_payment(&id).await?;
///     Ok(Json(booking))
/// }
/// ```
#[derive(Debug)]
pub struct AppError(pub EngineError);

/// Converts application errors to HTTP responses
///
/// This implementation maps each error type to the appropriate HTTP status
/// code and formats the error message into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            EngineError::NotFound(_) => StatusCode::NOT_FOUND,
            EngineError::Validation(_) => StatusCode::BAD_REQUEST,
            EngineError::PolicyViolation(_) => StatusCode::FORBIDDEN,
            EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            EngineError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let body = Json(json!({
            "error": self.0.to_string(),
            "kind": self.0.kind(),
        }));

        (status, body).into_response()
    }
}

/// Automatic conversion from EngineError to AppError
///
/// This implementation allows using the `?` operator with functions that
/// return `Result<T, EngineError>` in handler functions that return
/// `Result<T, AppError>`.
impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// Wraps the eyre error in an `EngineError::Database` variant so that raw
/// storage failures surface as 500s.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(EngineError::Database(err))
    }
}
