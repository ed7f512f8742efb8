//! Per-user progression state.
//!
//! A [`ProgressionRecord`] is owned by exactly one user. Callers load it from
//! persistence, hand it to the engine, and store whatever record the engine
//! returns. The engine never mutates a record in place.
pub mod types;

use std::collections::BTreeSet;

pub use types::{LevelId, Points, RewardId};

/// Canonical snapshot of one user's progression.
///
/// Invariants (enforced by the engine, not by construction):
/// - `faith_points` never exceeds the configured maximum
/// - `unlocked_filters` and `completed_levels` only grow
/// - `tutorial_completed` only moves from `false` to `true`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionRecord {
    pub faith_points: Points,
    pub unlocked_filters: BTreeSet<RewardId>,
    pub completed_levels: BTreeSet<LevelId>,
    #[cfg_attr(feature = "serde", serde(alias = "completed_tutorial"))]
    pub tutorial_completed: bool,
}

impl ProgressionRecord {
    /// Creates the zeroed record every user starts with.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: sets the faith point balance.
    #[must_use]
    pub fn with_points(mut self, faith_points: Points) -> Self {
        self.faith_points = faith_points;
        self
    }

    /// Builder: marks a reward as already unlocked.
    #[must_use]
    pub fn with_filter(mut self, reward: impl Into<RewardId>) -> Self {
        self.unlocked_filters.insert(reward.into());
        self
    }

    /// Builder: marks a level as already completed.
    #[must_use]
    pub fn with_completed_level(mut self, level: impl Into<LevelId>) -> Self {
        self.completed_levels.insert(level.into());
        self
    }

    /// Builder: marks the tutorial as done.
    #[must_use]
    pub fn with_tutorial_completed(mut self) -> Self {
        self.tutorial_completed = true;
        self
    }

    pub fn has_filter(&self, reward: &RewardId) -> bool {
        self.unlocked_filters.contains(reward)
    }

    pub fn has_completed(&self, level: &LevelId) -> bool {
        self.completed_levels.contains(level)
    }
}
