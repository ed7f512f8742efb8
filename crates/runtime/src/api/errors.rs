//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the engine and repositories so clients can bubble them
//! up with consistent context.
use clouds_core::{EngineError, ErrorSeverity, ProgressionError};
use thiserror::Error;

pub use crate::repository::RepositoryError;
use crate::repository::UserId;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("gave up on user '{user}' after {attempts} conflicting writes")]
    RetriesExhausted { user: UserId, attempts: u32 },
}

impl ProgressionError for ServiceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Engine(err) => err.severity(),
            Self::Repository(err) => err.severity(),
            Self::RetriesExhausted { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Engine(err) => err.error_code(),
            Self::Repository(err) => err.error_code(),
            Self::RetriesExhausted { .. } => "SERVICE_RETRIES_EXHAUSTED",
        }
    }
}
