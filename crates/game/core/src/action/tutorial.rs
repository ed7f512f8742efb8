use crate::action::award::grant;
use crate::action::{Award, ProgressionTransition, TutorialCompletion};
use crate::config::ProgressionConfig;
use crate::engine::EngineError;
use crate::state::ProgressionRecord;

/// Finishes the onboarding tutorial and awards its one-time bonus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompleteTutorial;

impl ProgressionTransition for CompleteTutorial {
    type Result = TutorialCompletion;

    fn apply(
        &self,
        record: &mut ProgressionRecord,
        config: &ProgressionConfig,
    ) -> Result<TutorialCompletion, EngineError> {
        if record.tutorial_completed {
            return Ok(TutorialCompletion {
                newly_completed: false,
                award: Award::none(),
            });
        }

        record.tutorial_completed = true;
        let award = grant(record, config.tutorial_bonus, config);
        Ok(TutorialCompletion {
            newly_completed: true,
            award,
        })
    }
}
