use crate::state::{LevelId, Points, RewardId};

/// Effect of a point award on a record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Award {
    /// Points actually added after clamping to the cap.
    pub points_awarded: Points,
    /// Rewards unlocked by this award only, in ascending threshold order.
    pub newly_unlocked: Vec<RewardId>,
}

impl Award {
    /// An award that changed nothing.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.points_awarded == 0 && self.newly_unlocked.is_empty()
    }
}

/// Result of a level or challenge completion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelCompletion {
    pub level: LevelId,
    /// False when the level had already been completed (no points awarded).
    pub newly_completed: bool,
    pub award: Award,
}

/// Result of finishing the tutorial.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TutorialCompletion {
    /// False when the tutorial had already been completed (no bonus).
    pub newly_completed: bool,
    pub award: Award,
}

/// Action-specific result of [`crate::ProgressionEngine::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Award(Award),
    Tutorial(TutorialCompletion),
    Level(LevelCompletion),
}

impl ActionResult {
    /// The point award carried by any result.
    pub fn award(&self) -> &Award {
        match self {
            Self::Award(award) => award,
            Self::Tutorial(tutorial) => &tutorial.award,
            Self::Level(level) => &level.award,
        }
    }

    /// The level completed by this action, if it was completed just now.
    pub fn completed_level(&self) -> Option<&LevelId> {
        match self {
            Self::Level(level) if level.newly_completed => Some(&level.level),
            _ => None,
        }
    }

    /// True if this action completed the tutorial just now.
    pub fn completed_tutorial(&self) -> bool {
        matches!(self, Self::Tutorial(tutorial) if tutorial.newly_completed)
    }
}

impl From<Award> for ActionResult {
    fn from(award: Award) -> Self {
        Self::Award(award)
    }
}

impl From<TutorialCompletion> for ActionResult {
    fn from(tutorial: TutorialCompletion) -> Self {
        Self::Tutorial(tutorial)
    }
}

impl From<LevelCompletion> for ActionResult {
    fn from(level: LevelCompletion) -> Self {
        Self::Level(level)
    }
}
