//! Static progression rules: caps, bonuses, reward thresholds and levels.
//!
//! The configuration is domain data, not user data. `clouds-content` loads it
//! from TOML; [`ProgressionConfig::default`] carries the shipped content so the
//! engine can run without any files.
use std::collections::HashSet;

use crate::state::{LevelId, Points, RewardId};

/// A cosmetic reward granted once the balance reaches `threshold_points`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardRule {
    pub threshold_points: Points,
    pub reward_id: RewardId,
}

impl RewardRule {
    pub fn new(threshold_points: Points, reward_id: impl Into<RewardId>) -> Self {
        Self {
            threshold_points,
            reward_id: reward_id.into(),
        }
    }
}

/// Per-question scoring for quiz-style levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChallengeScoring {
    pub questions: u32,
    pub points_per_correct: Points,
}

impl ChallengeScoring {
    /// Points earned for a perfect run.
    pub const fn max_points(&self) -> Points {
        self.questions.saturating_mul(self.points_per_correct)
    }
}

/// A gated level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelDefinition {
    pub level_id: LevelId,
    /// Balance required before the level opens. Zero means always open.
    pub unlock_threshold: Points,
    /// Points granted by a plain level completion.
    pub completion_points: Points,
    #[cfg_attr(feature = "serde", serde(default))]
    pub challenge: Option<ChallengeScoring>,
}

impl LevelDefinition {
    pub fn new(
        level_id: impl Into<LevelId>,
        unlock_threshold: Points,
        completion_points: Points,
    ) -> Self {
        Self {
            level_id: level_id.into(),
            unlock_threshold,
            completion_points,
            challenge: None,
        }
    }

    /// Builder: attaches per-question scoring.
    #[must_use]
    pub fn with_challenge(mut self, questions: u32, points_per_correct: Points) -> Self {
        self.challenge = Some(ChallengeScoring {
            questions,
            points_per_correct,
        });
        self
    }
}

/// Points granted per content-creation action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentAwards {
    pub meme: Points,
    /// Points per generated tweet.
    pub tweet: Points,
    pub tweets_per_batch: u32,
    pub video_script: Points,
}

impl ContentAwards {
    pub const DEFAULT_MEME: Points = 15;
    pub const DEFAULT_TWEET: Points = 10;
    pub const DEFAULT_TWEETS_PER_BATCH: u32 = 3;
    pub const DEFAULT_VIDEO_SCRIPT: Points = 20;

    /// Points for one full tweet batch.
    pub const fn tweet_batch(&self) -> Points {
        self.tweet.saturating_mul(self.tweets_per_batch)
    }
}

impl Default for ContentAwards {
    fn default() -> Self {
        Self {
            meme: Self::DEFAULT_MEME,
            tweet: Self::DEFAULT_TWEET,
            tweets_per_batch: Self::DEFAULT_TWEETS_PER_BATCH,
            video_script: Self::DEFAULT_VIDEO_SCRIPT,
        }
    }
}

/// Complete rule set consumed by [`crate::ProgressionEngine`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionConfig {
    pub max_points: Points,
    pub tutorial_bonus: Points,
    pub referral_bonus: Points,
    #[cfg_attr(feature = "serde", serde(default))]
    pub awards: ContentAwards,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rewards: Vec<RewardRule>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub levels: Vec<LevelDefinition>,
}

impl ProgressionConfig {
    pub const MAX_POINTS: Points = 777;
    pub const DEFAULT_TUTORIAL_BONUS: Points = 20;
    pub const DEFAULT_REFERRAL_BONUS: Points = 5;

    pub const OFFICE_INFERNO: &'static str = "office_inferno";
    pub const WELLNESS_WHIRLWIND: &'static str = "wellness_whirlwind";
    pub const SISTERHOOD_SUMMIT: &'static str = "sisterhood_summit";

    /// Creates a config with default caps and bonuses and no rewards or levels.
    pub fn empty() -> Self {
        Self {
            max_points: Self::MAX_POINTS,
            tutorial_bonus: Self::DEFAULT_TUTORIAL_BONUS,
            referral_bonus: Self::DEFAULT_REFERRAL_BONUS,
            awards: ContentAwards::default(),
            rewards: Vec::new(),
            levels: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_reward(mut self, rule: RewardRule) -> Self {
        self.rewards.push(rule);
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: LevelDefinition) -> Self {
        self.levels.push(level);
        self
    }

    /// Looks up a level definition by id.
    pub fn level(&self, level_id: &LevelId) -> Option<&LevelDefinition> {
        self.levels.iter().find(|level| &level.level_id == level_id)
    }

    /// Reward rules in evaluation order.
    ///
    /// Ascending threshold; rules sharing a threshold keep configuration order.
    pub fn rewards_by_threshold(&self) -> Vec<&RewardRule> {
        let mut rules: Vec<&RewardRule> = self.rewards.iter().collect();
        rules.sort_by_key(|rule| rule.threshold_points);
        rules
    }

    /// Checks the rule set for configuration mistakes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_points == 0 {
            return Err(ConfigError::ZeroMaxPoints);
        }

        let mut rewards = HashSet::new();
        for rule in &self.rewards {
            if rule.threshold_points > self.max_points {
                return Err(ConfigError::RewardAboveMax {
                    reward: rule.reward_id.clone(),
                    threshold: rule.threshold_points,
                    max: self.max_points,
                });
            }
            if !rewards.insert(&rule.reward_id) {
                return Err(ConfigError::DuplicateReward(rule.reward_id.clone()));
            }
        }

        let mut levels = HashSet::new();
        for level in &self.levels {
            if !levels.insert(&level.level_id) {
                return Err(ConfigError::DuplicateLevel(level.level_id.clone()));
            }
            if level.unlock_threshold > self.max_points {
                return Err(ConfigError::LevelAboveMax {
                    level: level.level_id.clone(),
                    threshold: level.unlock_threshold,
                    max: self.max_points,
                });
            }
            if let Some(challenge) = level.challenge {
                if challenge.questions == 0 {
                    return Err(ConfigError::ChallengeWithoutQuestions(
                        level.level_id.clone(),
                    ));
                }
                if challenge.max_points() != level.completion_points {
                    return Err(ConfigError::ChallengePointsMismatch {
                        level: level.level_id.clone(),
                        expected: challenge.max_points(),
                        actual: level.completion_points,
                    });
                }
            }
        }

        Ok(())
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self::empty()
            .with_reward(RewardRule::new(100, "Glamour Wings"))
            .with_reward(RewardRule::new(150, "Dreamy Halo"))
            .with_reward(RewardRule::new(200, "Celestial Crown"))
            .with_reward(RewardRule::new(250, "Ethereal Glow"))
            .with_level(LevelDefinition::new(Self::OFFICE_INFERNO, 0, 75).with_challenge(3, 25))
            .with_level(LevelDefinition::new(Self::WELLNESS_WHIRLWIND, 100, 100))
            .with_level(LevelDefinition::new(Self::SISTERHOOD_SUMMIT, 250, 50))
    }
}

/// Problems detected by [`ProgressionConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_points must be greater than zero")]
    ZeroMaxPoints,

    #[error("reward '{reward}' threshold {threshold} exceeds max points {max}")]
    RewardAboveMax {
        reward: RewardId,
        threshold: Points,
        max: Points,
    },

    #[error("reward '{0}' is configured more than once")]
    DuplicateReward(RewardId),

    #[error("level '{0}' is configured more than once")]
    DuplicateLevel(LevelId),

    #[error("level '{level}' unlock threshold {threshold} exceeds max points {max}")]
    LevelAboveMax {
        level: LevelId,
        threshold: Points,
        max: Points,
    },

    #[error("challenge level '{0}' has no questions")]
    ChallengeWithoutQuestions(LevelId),

    #[error("challenge level '{level}' awards {actual} on completion but scores up to {expected}")]
    ChallengePointsMismatch {
        level: LevelId,
        expected: Points,
        actual: Points,
    },
}
