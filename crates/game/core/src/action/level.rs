//! Level and challenge completion.

use crate::action::award::grant;
use crate::action::{Award, LevelCompletion, ProgressionTransition};
use crate::config::{ChallengeScoring, LevelDefinition, ProgressionConfig};
use crate::engine::{EngineError, TransitionPhase};
use crate::state::{LevelId, ProgressionRecord};

fn lookup<'c>(
    config: &'c ProgressionConfig,
    level: &LevelId,
) -> Result<&'c LevelDefinition, EngineError> {
    config
        .level(level)
        .ok_or_else(|| EngineError::UnknownLevel(level.clone()))
}

fn scoring(config: &ProgressionConfig, level: &LevelId) -> Result<ChallengeScoring, EngineError> {
    lookup(config, level)?
        .challenge
        .ok_or_else(|| EngineError::ChallengeNotScored(level.clone()))
}

fn ensure_recorded(record: &ProgressionRecord, level: &LevelId) -> Result<(), EngineError> {
    if record.has_completed(level) {
        Ok(())
    } else {
        Err(EngineError::invariant(
            TransitionPhase::PostValidate,
            format!("level '{level}' missing from completed levels"),
        ))
    }
}

/// Marks a level complete and awards its completion points once.
///
/// Completing an already-completed level is a no-op that awards nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompleteLevel {
    pub level: LevelId,
}

impl CompleteLevel {
    pub fn new(level: impl Into<LevelId>) -> Self {
        Self {
            level: level.into(),
        }
    }
}

impl ProgressionTransition for CompleteLevel {
    type Result = LevelCompletion;

    fn pre_validate(
        &self,
        _record: &ProgressionRecord,
        config: &ProgressionConfig,
    ) -> Result<(), EngineError> {
        lookup(config, &self.level).map(|_| ())
    }

    fn apply(
        &self,
        record: &mut ProgressionRecord,
        config: &ProgressionConfig,
    ) -> Result<LevelCompletion, EngineError> {
        let definition = lookup(config, &self.level)?;

        if !record.completed_levels.insert(self.level.clone()) {
            return Ok(LevelCompletion {
                level: self.level.clone(),
                newly_completed: false,
                award: Award::none(),
            });
        }

        let award = grant(record, definition.completion_points, config);
        Ok(LevelCompletion {
            level: self.level.clone(),
            newly_completed: true,
            award,
        })
    }

    fn post_validate(
        &self,
        record: &ProgressionRecord,
        _config: &ProgressionConfig,
    ) -> Result<(), EngineError> {
        ensure_recorded(record, &self.level)
    }
}

/// Completes a quiz-style level, awarding points per correct answer.
///
/// Shares the once-only rule with [`CompleteLevel`]: a level that is already
/// complete awards nothing, whatever the score.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompleteChallenge {
    pub level: LevelId,
    pub correct_answers: u32,
}

impl CompleteChallenge {
    pub fn new(level: impl Into<LevelId>, correct_answers: u32) -> Self {
        Self {
            level: level.into(),
            correct_answers,
        }
    }
}

impl ProgressionTransition for CompleteChallenge {
    type Result = LevelCompletion;

    fn pre_validate(
        &self,
        _record: &ProgressionRecord,
        config: &ProgressionConfig,
    ) -> Result<(), EngineError> {
        let scoring = scoring(config, &self.level)?;
        if self.correct_answers > scoring.questions {
            return Err(EngineError::invalid_argument(
                format!(
                    "correct answers exceed the {} questions of '{}'",
                    scoring.questions, self.level
                ),
                i64::from(self.correct_answers),
            ));
        }
        Ok(())
    }

    fn apply(
        &self,
        record: &mut ProgressionRecord,
        config: &ProgressionConfig,
    ) -> Result<LevelCompletion, EngineError> {
        let scoring = scoring(config, &self.level)?;

        if !record.completed_levels.insert(self.level.clone()) {
            return Ok(LevelCompletion {
                level: self.level.clone(),
                newly_completed: false,
                award: Award::none(),
            });
        }

        let earned = self
            .correct_answers
            .min(scoring.questions)
            .saturating_mul(scoring.points_per_correct);
        let award = grant(record, earned, config);
        Ok(LevelCompletion {
            level: self.level.clone(),
            newly_completed: true,
            award,
        })
    }

    fn post_validate(
        &self,
        record: &ProgressionRecord,
        _config: &ProgressionConfig,
    ) -> Result<(), EngineError> {
        ensure_recorded(record, &self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_skips_completed_level() {
        let config = ProgressionConfig::default();
        let mut record = ProgressionRecord::new()
            .with_points(10)
            .with_completed_level("wellness_whirlwind");

        let result = CompleteLevel::new("wellness_whirlwind")
            .apply(&mut record, &config)
            .unwrap();

        assert!(!result.newly_completed);
        assert_eq!(record.faith_points, 10);
    }

    #[test]
    fn challenge_rejects_impossible_scores() {
        let config = ProgressionConfig::default();
        let record = ProgressionRecord::new();

        let err = CompleteChallenge::new("office_inferno", 4)
            .pre_validate(&record, &config)
            .unwrap_err();

        assert!(matches!(err, EngineError::InvalidArgument { value: 4, .. }));
    }

    #[test]
    fn challenge_requires_scoring() {
        let config = ProgressionConfig::default();
        let record = ProgressionRecord::new();

        let err = CompleteChallenge::new("sisterhood_summit", 1)
            .pre_validate(&record, &config)
            .unwrap_err();

        assert_eq!(
            err,
            EngineError::ChallengeNotScored(LevelId::from("sisterhood_summit"))
        );
    }

    #[test]
    fn post_validate_detects_missing_level() {
        let config = ProgressionConfig::default();
        let record = ProgressionRecord::new();

        let err = CompleteLevel::new("office_inferno")
            .post_validate(&record, &config)
            .unwrap_err();

        assert!(matches!(
            err,
            EngineError::InvariantViolated {
                phase: TransitionPhase::PostValidate,
                ..
            }
        ));
    }
}
