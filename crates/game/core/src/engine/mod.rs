//! Progression rules engine.
//!
//! The [`ProgressionEngine`] is the only place where faith points, reward
//! unlocks and level completion change. It borrows a [`ProgressionConfig`],
//! holds no other state, and turns a record plus an action into a new record;
//! persisting that record is the caller's job.

mod errors;
mod transition;

pub use errors::{EngineError, TransitionPhase};

use crate::action::{
    ActionResult, Award, AwardPoints, CompleteChallenge, CompleteLevel, CompleteTutorial,
    ContentEvent, LevelCompletion, ProgressionAction, RecordContent, RedeemReferral,
    TutorialCompletion,
};
use crate::config::ProgressionConfig;
use crate::meter::{FaithMeter, NextReward};
use crate::state::{LevelId, ProgressionRecord};

use transition::{drive_transition, execute_transition};

/// New record produced by a transition, plus the action-specific result.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome<R> {
    pub record: ProgressionRecord,
    pub result: R,
}

impl<R: Into<ActionResult>> Outcome<R> {
    /// Erases the action-specific result type.
    pub fn into_action_result(self) -> Outcome<ActionResult> {
        Outcome {
            record: self.record,
            result: self.result.into(),
        }
    }
}

/// Availability of a level for one user.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LevelStatus {
    Locked,
    Unlocked,
    Completed,
}

/// Pure progression engine.
///
/// All operations are deterministic and synchronous. Errors are
/// caller-contract violations (negative awards, unknown levels) and are never
/// worth retrying.
#[derive(Clone, Copy, Debug)]
pub struct ProgressionEngine<'a> {
    config: &'a ProgressionConfig,
}

impl<'a> ProgressionEngine<'a> {
    /// Creates an engine over the given rule set.
    pub fn new(config: &'a ProgressionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a ProgressionConfig {
        self.config
    }

    /// Adds `amount` points (clamped to the cap) and unlocks every reward the
    /// new balance reaches. Only rewards unlocked by this call are reported.
    pub fn award_points(
        &self,
        record: &ProgressionRecord,
        amount: i64,
    ) -> Result<Outcome<Award>, EngineError> {
        drive_transition(&AwardPoints::new(amount), record, self.config)
    }

    /// Completes a level once, awarding its completion points.
    ///
    /// A second completion returns the record unchanged with zero points.
    pub fn complete_level(
        &self,
        record: &ProgressionRecord,
        level: &LevelId,
    ) -> Result<Outcome<LevelCompletion>, EngineError> {
        drive_transition(&CompleteLevel::new(level.clone()), record, self.config)
    }

    /// Completes a quiz-style level, awarding points per correct answer.
    pub fn complete_challenge(
        &self,
        record: &ProgressionRecord,
        level: &LevelId,
        correct_answers: u32,
    ) -> Result<Outcome<LevelCompletion>, EngineError> {
        drive_transition(
            &CompleteChallenge::new(level.clone(), correct_answers),
            record,
            self.config,
        )
    }

    /// Returns true once the balance reaches the level's unlock threshold.
    pub fn is_level_unlocked(
        &self,
        record: &ProgressionRecord,
        level: &LevelId,
    ) -> Result<bool, EngineError> {
        let definition = self
            .config
            .level(level)
            .ok_or_else(|| EngineError::UnknownLevel(level.clone()))?;
        Ok(record.faith_points >= definition.unlock_threshold)
    }

    /// Locked, unlocked or completed; completion wins over the threshold.
    pub fn level_status(
        &self,
        record: &ProgressionRecord,
        level: &LevelId,
    ) -> Result<LevelStatus, EngineError> {
        let unlocked = self.is_level_unlocked(record, level)?;
        Ok(if record.has_completed(level) {
            LevelStatus::Completed
        } else if unlocked {
            LevelStatus::Unlocked
        } else {
            LevelStatus::Locked
        })
    }

    /// Finishes the tutorial; the bonus is awarded on the first call only.
    pub fn complete_tutorial(
        &self,
        record: &ProgressionRecord,
    ) -> Result<Outcome<TutorialCompletion>, EngineError> {
        drive_transition(&CompleteTutorial, record, self.config)
    }

    /// Awards the points carried by a content-creation event.
    pub fn record_content(
        &self,
        record: &ProgressionRecord,
        event: ContentEvent,
    ) -> Result<Outcome<Award>, EngineError> {
        drive_transition(&RecordContent::new(event), record, self.config)
    }

    /// Awards the referral bonus.
    pub fn redeem_referral(
        &self,
        record: &ProgressionRecord,
    ) -> Result<Outcome<Award>, EngineError> {
        drive_transition(&RedeemReferral, record, self.config)
    }

    /// Applies any action through the transition pipeline.
    pub fn apply(
        &self,
        record: &ProgressionRecord,
        action: &ProgressionAction,
    ) -> Result<Outcome<ActionResult>, EngineError> {
        execute_transition(action, record, self.config)
    }

    pub fn faith_meter(&self, record: &ProgressionRecord) -> FaithMeter {
        FaithMeter::new(record.faith_points, self.config.max_points)
    }

    /// The cheapest reward still locked, if any.
    pub fn next_reward(&self, record: &ProgressionRecord) -> Option<NextReward<'a>> {
        NextReward::find(record, self.config)
    }
}
