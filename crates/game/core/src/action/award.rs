//! Point awards and reward unlocking.

use crate::action::{Award, ProgressionTransition};
use crate::config::ProgressionConfig;
use crate::engine::EngineError;
use crate::state::{Points, ProgressionRecord};

/// Adds `amount` points to a record, clamped to the configured cap, and
/// unlocks every reward whose threshold the new balance reaches.
///
/// Rules are evaluated in ascending threshold order. A reward already on the
/// record is neither re-added nor reported, so the first rule carrying a
/// duplicated reward id wins.
pub(crate) fn grant(
    record: &mut ProgressionRecord,
    amount: Points,
    config: &ProgressionConfig,
) -> Award {
    let before = record.faith_points;
    record.faith_points = before.saturating_add(amount).min(config.max_points);

    let mut newly_unlocked = Vec::new();
    for rule in config.rewards_by_threshold() {
        if rule.threshold_points <= record.faith_points
            && record.unlocked_filters.insert(rule.reward_id.clone())
        {
            newly_unlocked.push(rule.reward_id.clone());
        }
    }

    Award {
        points_awarded: record.faith_points.saturating_sub(before),
        newly_unlocked,
    }
}

/// Converts a caller-supplied amount, rejecting negatives.
///
/// Amounts beyond `Points::MAX` saturate; the cap clamps them anyway.
pub(crate) fn checked_amount(amount: i64) -> Result<Points, EngineError> {
    if amount < 0 {
        return Err(EngineError::invalid_argument(
            "point award must be non-negative",
            amount,
        ));
    }
    Ok(Points::try_from(amount).unwrap_or(Points::MAX))
}

/// Awards an arbitrary, non-negative number of points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AwardPoints {
    pub amount: i64,
}

impl AwardPoints {
    pub fn new(amount: i64) -> Self {
        Self { amount }
    }
}

impl ProgressionTransition for AwardPoints {
    type Result = Award;

    fn pre_validate(
        &self,
        _record: &ProgressionRecord,
        _config: &ProgressionConfig,
    ) -> Result<(), EngineError> {
        checked_amount(self.amount).map(|_| ())
    }

    fn apply(
        &self,
        record: &mut ProgressionRecord,
        config: &ProgressionConfig,
    ) -> Result<Award, EngineError> {
        let amount = checked_amount(self.amount)?;
        Ok(grant(record, amount, config))
    }
}

/// Awards the referral bonus for a redeemed invitation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RedeemReferral;

impl ProgressionTransition for RedeemReferral {
    type Result = Award;

    fn apply(
        &self,
        record: &mut ProgressionRecord,
        config: &ProgressionConfig,
    ) -> Result<Award, EngineError> {
        Ok(grant(record, config.referral_bonus, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RewardRule;
    use crate::state::RewardId;

    #[test]
    fn grant_clamps_to_cap() {
        let config = ProgressionConfig::default();
        let mut record = ProgressionRecord::new().with_points(770);

        let award = grant(&mut record, 100, &config);

        assert_eq!(record.faith_points, 777);
        assert_eq!(award.points_awarded, 7);
    }

    #[test]
    fn grant_unlocks_every_crossed_threshold_in_order() {
        let config = ProgressionConfig::default();
        let mut record = ProgressionRecord::new().with_points(140);

        let award = grant(&mut record, 70, &config);

        assert_eq!(
            award.newly_unlocked,
            vec![
                RewardId::from("Glamour Wings"),
                RewardId::from("Dreamy Halo"),
                RewardId::from("Celestial Crown"),
            ]
        );
    }

    #[test]
    fn grant_reports_only_new_unlocks() {
        let config = ProgressionConfig::default();
        let mut record = ProgressionRecord::new()
            .with_points(140)
            .with_filter("Glamour Wings");

        let award = grant(&mut record, 20, &config);

        assert_eq!(award.newly_unlocked, vec![RewardId::from("Dreamy Halo")]);
    }

    #[test]
    fn duplicate_reward_ids_unlock_once() {
        let config = ProgressionConfig::empty()
            .with_reward(RewardRule::new(50, "Twin"))
            .with_reward(RewardRule::new(10, "Twin"));
        let mut record = ProgressionRecord::new();

        let award = grant(&mut record, 60, &config);

        assert_eq!(award.newly_unlocked, vec![RewardId::from("Twin")]);
        assert_eq!(record.unlocked_filters.len(), 1);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(matches!(
            checked_amount(-1),
            Err(EngineError::InvalidArgument { value: -1, .. })
        ));
        assert_eq!(checked_amount(i64::MAX).unwrap(), Points::MAX);
    }
}
