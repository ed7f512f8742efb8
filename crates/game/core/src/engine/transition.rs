//! Action transition dispatch and execution logic.

use crate::action::{ActionResult, ProgressionAction, ProgressionTransition};
use crate::config::ProgressionConfig;
use crate::state::ProgressionRecord;

use super::Outcome;
use super::errors::{EngineError, TransitionPhase};

/// Rejects records that no engine operation could have produced.
fn check_record(record: &ProgressionRecord, config: &ProgressionConfig) -> Result<(), EngineError> {
    if record.faith_points > config.max_points {
        return Err(EngineError::invalid_argument(
            format!("record faith points exceed the maximum of {}", config.max_points),
            i64::from(record.faith_points),
        ));
    }
    Ok(())
}

/// Record-wide invariants every transition must preserve.
fn check_invariants(
    before: &ProgressionRecord,
    after: &ProgressionRecord,
    config: &ProgressionConfig,
) -> Result<(), EngineError> {
    let phase = TransitionPhase::PostValidate;

    if after.faith_points > config.max_points {
        return Err(EngineError::invariant(phase, "faith points above maximum"));
    }
    if after.faith_points < before.faith_points {
        return Err(EngineError::invariant(phase, "faith points decreased"));
    }
    if !before.unlocked_filters.is_subset(&after.unlocked_filters) {
        return Err(EngineError::invariant(phase, "unlocked filter removed"));
    }
    if !before.completed_levels.is_subset(&after.completed_levels) {
        return Err(EngineError::invariant(phase, "completed level removed"));
    }
    if before.tutorial_completed && !after.tutorial_completed {
        return Err(EngineError::invariant(phase, "tutorial completion reverted"));
    }
    Ok(())
}

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions against the caller's record
/// 2. `apply` - Mutate a private copy and produce the result
/// 3. `post_validate` - Verify action postconditions and record invariants
///
/// The caller's record is never touched; the copy is returned on success.
pub(super) fn drive_transition<T>(
    transition: &T,
    record: &ProgressionRecord,
    config: &ProgressionConfig,
) -> Result<Outcome<T::Result>, EngineError>
where
    T: ProgressionTransition,
{
    check_record(record, config)?;
    transition.pre_validate(record, config)?;

    let mut next = record.clone();
    let result = transition.apply(&mut next, config)?;

    transition.post_validate(&next, config)?;
    check_invariants(record, &next, config)?;

    Ok(Outcome {
        record: next,
        result,
    })
}

/// Routes an action to its transition and wraps the result in [`ActionResult`].
pub(super) fn execute_transition(
    action: &ProgressionAction,
    record: &ProgressionRecord,
    config: &ProgressionConfig,
) -> Result<Outcome<ActionResult>, EngineError> {
    match action {
        ProgressionAction::AwardPoints(transition) => {
            drive_transition(transition, record, config).map(Outcome::into_action_result)
        }
        ProgressionAction::RecordContent(transition) => {
            drive_transition(transition, record, config).map(Outcome::into_action_result)
        }
        ProgressionAction::RedeemReferral(transition) => {
            drive_transition(transition, record, config).map(Outcome::into_action_result)
        }
        ProgressionAction::CompleteTutorial(transition) => {
            drive_transition(transition, record, config).map(Outcome::into_action_result)
        }
        ProgressionAction::CompleteLevel(transition) => {
            drive_transition(transition, record, config).map(Outcome::into_action_result)
        }
        ProgressionAction::CompleteChallenge(transition) => {
            drive_transition(transition, record, config).map(Outcome::into_action_result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariants_catch_shrinking_sets() {
        let config = ProgressionConfig::default();
        let before = ProgressionRecord::new().with_points(120).with_filter("Glamour Wings");
        let after = ProgressionRecord::new().with_points(120);

        let err = check_invariants(&before, &after, &config).unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolated { .. }));
    }

    #[test]
    fn invariants_catch_reverted_tutorial() {
        let config = ProgressionConfig::default();
        let before = ProgressionRecord::new().with_tutorial_completed();
        let after = ProgressionRecord::new();

        assert!(check_invariants(&before, &after, &config).is_err());
    }

    #[test]
    fn records_above_cap_are_rejected() {
        let config = ProgressionConfig::default();
        let record = ProgressionRecord::new().with_points(900);

        assert!(matches!(
            check_record(&record, &config),
            Err(EngineError::InvalidArgument { value: 900, .. })
        ));
    }
}
