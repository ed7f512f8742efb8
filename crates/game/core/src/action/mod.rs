//! Progression actions.
//!
//! Every state change a user can cause is an action implementing
//! [`ProgressionTransition`]. The engine drives each one through the same
//! pre_validate → apply → post_validate pipeline, so invariant checks apply
//! uniformly no matter which caller triggered the change.
//!
//! # Module Structure
//!
//! - `award`: raw point awards, referral bonus and the shared unlock logic
//! - `content`: content-creation events (memes, tweets, video scripts)
//! - `level`: level and challenge completion
//! - `tutorial`: the one-time tutorial bonus
//! - `types`: transition results

mod award;
mod content;
mod level;
mod tutorial;
mod types;

pub use award::{AwardPoints, RedeemReferral};
pub use content::{ContentEvent, ContentKind, RecordContent};
pub use level::{CompleteChallenge, CompleteLevel};
pub use tutorial::CompleteTutorial;
pub use types::{ActionResult, Award, LevelCompletion, TutorialCompletion};

pub(crate) use award::grant;

use crate::config::ProgressionConfig;
use crate::engine::EngineError;
use crate::state::{LevelId, ProgressionRecord};

/// Defines how a concrete action transforms a progression record.
///
/// `apply` receives a private copy of the caller's record; the engine only
/// hands it back once every phase has succeeded.
pub trait ProgressionTransition {
    type Result;

    /// Validates pre-conditions using the record **before** mutation.
    fn pre_validate(
        &self,
        _record: &ProgressionRecord,
        _config: &ProgressionConfig,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    /// Applies the action to the working copy of the record.
    fn apply(
        &self,
        record: &mut ProgressionRecord,
        config: &ProgressionConfig,
    ) -> Result<Self::Result, EngineError>;

    /// Validates action-specific post-conditions using the record **after**
    /// mutation. Record-wide invariants are checked by the engine itself.
    fn post_validate(
        &self,
        _record: &ProgressionRecord,
        _config: &ProgressionConfig,
    ) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Any progression action, for callers that route actions generically.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProgressionAction {
    AwardPoints(AwardPoints),
    RecordContent(RecordContent),
    RedeemReferral(RedeemReferral),
    CompleteTutorial(CompleteTutorial),
    CompleteLevel(CompleteLevel),
    CompleteChallenge(CompleteChallenge),
}

impl ProgressionAction {
    pub fn award_points(amount: i64) -> Self {
        Self::AwardPoints(AwardPoints::new(amount))
    }

    pub fn record_content(event: ContentEvent) -> Self {
        Self::RecordContent(RecordContent::new(event))
    }

    pub fn redeem_referral() -> Self {
        Self::RedeemReferral(RedeemReferral)
    }

    pub fn complete_tutorial() -> Self {
        Self::CompleteTutorial(CompleteTutorial)
    }

    pub fn complete_level(level: impl Into<LevelId>) -> Self {
        Self::CompleteLevel(CompleteLevel::new(level))
    }

    pub fn complete_challenge(level: impl Into<LevelId>, correct_answers: u32) -> Self {
        Self::CompleteChallenge(CompleteChallenge::new(level, correct_answers))
    }

    /// Short name for logs and events.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AwardPoints(_) => "award_points",
            Self::RecordContent(_) => "record_content",
            Self::RedeemReferral(_) => "redeem_referral",
            Self::CompleteTutorial(_) => "complete_tutorial",
            Self::CompleteLevel(_) => "complete_level",
            Self::CompleteChallenge(_) => "complete_challenge",
        }
    }
}
