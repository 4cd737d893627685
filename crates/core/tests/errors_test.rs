use std::error::Error;

use kabinet_core::errors::{EngineError, EngineResult};

#[test]
fn test_engine_error_display() {
    let not_found = EngineError::NotFound("booking 7c1e9f4a".to_string());
    let validation = EngineError::Validation("Invalid input".to_string());
    let policy = EngineError::PolicyViolation("Too late to cancel".to_string());
    let database = EngineError::Database(eyre::eyre!("Database connection failed"));
    let internal = EngineError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    assert_eq!(not_found.to_string(), "Resource not found: booking 7c1e9f4a");
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert_eq!(policy.to_string(), "Policy violation: Too late to cancel");
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal error:"));
}

#[test]
fn test_error_kinds() {
    assert_eq!(EngineError::NotFound(String::new()).kind(), "not_found");
    assert_eq!(EngineError::Validation(String::new()).kind(), "validation");
    assert_eq!(
        EngineError::PolicyViolation(String::new()).kind(),
        "policy_violation"
    );
    assert_eq!(EngineError::Database(eyre::eyre!("x")).kind(), "database");
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let engine_error = EngineError::Internal(Box::new(io_error));

    assert!(engine_error.source().is_some());
}

#[test]
fn test_engine_result() {
    let result: EngineResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: EngineResult<i32> = Err(EngineError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_from_trait_implementation() {
    let eyre_error = eyre::eyre!("Database error");
    let engine_error: EngineError = eyre_error.into();

    assert!(engine_error.to_string().contains("Database error"));
}

#[test]
fn test_box_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let boxed_error: Box<dyn Error + Send + Sync> = Box::new(io_error);
    let engine_error = EngineError::Internal(boxed_error);

    assert!(engine_error.to_string().contains("IO error"));
}
