//! Error types for the progression transition pipeline.

use std::fmt;

use crate::error::{ErrorSeverity, ProgressionError};
use crate::state::LevelId;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

impl fmt::Display for TransitionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by [`crate::ProgressionEngine`].
///
/// All of them are caller-contract violations or bugs; none is worth retrying.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    #[error("invalid argument: {reason} (got {value})")]
    InvalidArgument { reason: String, value: i64 },

    #[error("unknown level '{0}'")]
    UnknownLevel(LevelId),

    #[error("level '{0}' has no challenge scoring")]
    ChallengeNotScored(LevelId),

    #[error("{phase} failed: invariant violated: {invariant}")]
    InvariantViolated {
        phase: TransitionPhase,
        invariant: String,
    },
}

impl EngineError {
    pub fn invalid_argument(reason: impl Into<String>, value: i64) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
            value,
        }
    }

    pub(crate) fn invariant(phase: TransitionPhase, invariant: impl Into<String>) -> Self {
        Self::InvariantViolated {
            phase,
            invariant: invariant.into(),
        }
    }
}

impl ProgressionError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidArgument { .. } | Self::UnknownLevel(_) | Self::ChallengeNotScored(_) => {
                ErrorSeverity::Validation
            }
            Self::InvariantViolated { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "ENGINE_INVALID_ARGUMENT",
            Self::UnknownLevel(_) => "ENGINE_UNKNOWN_LEVEL",
            Self::ChallengeNotScored(_) => "ENGINE_CHALLENGE_NOT_SCORED",
            Self::InvariantViolated { .. } => "ENGINE_INVARIANT_VIOLATED",
        }
    }
}
