use axum::response::IntoResponse;

use kabinet_api::middleware::error_handling::AppError;
use kabinet_core::errors::EngineError;

#[tokio::test]
async fn test_error_handling_not_found() {
    // Create a not found error
    let error = EngineError::NotFound("booking no-such-id".to_string());

    // Convert the error to a response
    let response = AppError(error).into_response();

    // Assert the response has the correct status code
    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_validation() {
    // Create a validation error
    let error = EngineError::Validation("Invalid input".to_string());

    // Convert the error to a response
    let response = AppError(error).into_response();

    // Assert the response has the correct status code
    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_policy_violation() {
    // Create a policy violation error
    let error = EngineError::PolicyViolation("Too late to cancel".to_string());

    // Convert the error to a response
    let response = AppError(error).into_response();

    // Assert the response has the correct status code
    assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_error_handling_database() {
    // Create a database error
    let error = EngineError::Database(eyre::eyre!("Database error"));

    // Convert the error to a response
    let response = AppError(error).into_response();

    // Assert the response has the correct status code
    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_error_handling_internal() {
    // Create an internal error
    let error = EngineError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    // Convert the error to a response
    let response = AppError(error).into_response();

    // Assert the response has the correct status code
    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_error_body_carries_message_and_kind() {
    let error = EngineError::PolicyViolation("Too late to cancel".to_string());
    let response = AppError(error).into_response();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["error"], "Policy violation: Too late to cancel");
    assert_eq!(body["kind"], "policy_violation");
}

#[tokio::test]
async fn test_eyre_reports_surface_as_database_errors() {
    let error: AppError = eyre::eyre!("connection reset").into();
    let response = error.into_response();

    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}
