//! Error types raised by repository implementations.

use clouds_core::{ErrorSeverity, ProgressionError};
use thiserror::Error;

use super::UserId;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("progression repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("no progression record for user '{0}'")]
    NotFound(UserId),

    #[error("progression record for user '{0}' already exists")]
    AlreadyExists(UserId),

    #[error("version conflict for user '{user}': expected {expected}, found {actual}")]
    VersionConflict {
        user: UserId,
        expected: u64,
        actual: u64,
    },
}

impl RepositoryError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}

impl ProgressionError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::VersionConflict { .. } => ErrorSeverity::Recoverable,
            Self::NotFound(_) | Self::AlreadyExists(_) => ErrorSeverity::Validation,
            Self::LockPoisoned | Self::Io(_) | Self::Serialization(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            Self::Io(_) => "REPOSITORY_IO",
            Self::Serialization(_) => "REPOSITORY_SERIALIZATION",
            Self::NotFound(_) => "REPOSITORY_NOT_FOUND",
            Self::AlreadyExists(_) => "REPOSITORY_ALREADY_EXISTS",
            Self::VersionConflict { .. } => "REPOSITORY_VERSION_CONFLICT",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
