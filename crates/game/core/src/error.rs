//! Common error infrastructure for clouds-core.
//!
//! Domain-specific errors (`EngineError`, `ChallengeError`) live next to the
//! code that raises them; this module provides the classification they share.

/// Severity level of an error, used to pick a handling strategy.
///
/// - **Recoverable**: a retry with fresh input may succeed (e.g. a lost
///   optimistic-concurrency race in the runtime)
/// - **Validation**: the caller broke an operation contract; do not retry
/// - **Internal**: an invariant was broken; indicates a bug
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all progression errors.
///
/// Implementors derive `thiserror::Error` for `Display` and classify each
/// variant by recoverability, not impact.
pub trait ProgressionError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a stable identifier for this error variant.
    ///
    /// Defaults to the type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
