use clouds_core::{LevelId, Points, RewardId};
use serde::{Deserialize, Serialize};

use crate::repository::UserId;

/// Observable change to a user's progression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressionEvent {
    /// Points were added; `total` is the balance after clamping.
    PointsAwarded {
        user: UserId,
        points: Points,
        total: Points,
    },
    RewardUnlocked {
        user: UserId,
        reward: RewardId,
    },
    LevelCompleted {
        user: UserId,
        level: LevelId,
    },
    TutorialCompleted {
        user: UserId,
    },
}

impl ProgressionEvent {
    pub fn user(&self) -> &UserId {
        match self {
            Self::PointsAwarded { user, .. }
            | Self::RewardUnlocked { user, .. }
            | Self::LevelCompleted { user, .. }
            | Self::TutorialCompleted { user } => user,
        }
    }
}
