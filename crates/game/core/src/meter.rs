//! Derived progress views.

use crate::config::{ProgressionConfig, RewardRule};
use crate::state::{Points, ProgressionRecord};

/// Progress toward the faith point cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaithMeter {
    pub points: Points,
    pub max_points: Points,
    /// Whole percent of the cap, 0..=100.
    pub percentage: u8,
    /// One heart per hundred points.
    pub hearts: u32,
}

impl FaithMeter {
    pub const POINTS_PER_HEART: Points = 100;

    pub fn new(points: Points, max_points: Points) -> Self {
        let percentage = if max_points == 0 {
            100
        } else {
            (u64::from(points) * 100 / u64::from(max_points)).min(100) as u8
        };

        Self {
            points,
            max_points,
            percentage,
            hearts: points / Self::POINTS_PER_HEART,
        }
    }

    pub fn is_full(&self) -> bool {
        self.points >= self.max_points
    }
}

/// The next reward a user can earn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NextReward<'a> {
    pub rule: &'a RewardRule,
    pub points_needed: Points,
}

impl<'a> NextReward<'a> {
    /// Lowest-threshold reward not yet on the record.
    pub fn find(record: &ProgressionRecord, config: &'a ProgressionConfig) -> Option<Self> {
        config
            .rewards_by_threshold()
            .into_iter()
            .find(|rule| !record.has_filter(&rule.reward_id))
            .map(|rule| Self {
                rule,
                points_needed: rule.threshold_points.saturating_sub(record.faith_points),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_rounds_down() {
        let meter = FaithMeter::new(388, 777);
        assert_eq!(meter.percentage, 49);
        assert_eq!(meter.hearts, 3);
        assert!(!meter.is_full());
    }

    #[test]
    fn meter_caps_at_full() {
        let meter = FaithMeter::new(777, 777);
        assert_eq!(meter.percentage, 100);
        assert!(meter.is_full());
    }

    #[test]
    fn next_reward_skips_unlocked() {
        let config = ProgressionConfig::default();
        let record = ProgressionRecord::new()
            .with_points(120)
            .with_filter("Glamour Wings");

        let next = NextReward::find(&record, &config).unwrap();

        assert_eq!(next.rule.reward_id.as_str(), "Dreamy Halo");
        assert_eq!(next.points_needed, 30);
    }

    #[test]
    fn next_reward_none_when_all_unlocked() {
        let config = ProgressionConfig::default();
        let record = config
            .rewards
            .iter()
            .fold(ProgressionRecord::new().with_points(777), |record, rule| {
                record.with_filter(rule.reward_id.clone())
            });

        assert!(NextReward::find(&record, &config).is_none());
    }
}
