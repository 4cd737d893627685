use thiserror::Error;

/// Errors produced by the booking engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A referenced entity does not exist.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The request was well-formed but semantically invalid.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation is forbidden by booking policy.
    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    /// A storage backend failed.
    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Short machine-readable tag used by API error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::NotFound(_) => "not_found",
            EngineError::Validation(_) => "validation",
            EngineError::PolicyViolation(_) => "policy_violation",
            EngineError::Database(_) => "database",
            EngineError::Internal(_) => "internal",
        }
    }
}
