//! Invariants that must hold across arbitrary sequences of engine operations.

use clouds_core::{
    ContentEvent, ContentKind, LevelId, ProgressionAction, ProgressionConfig, ProgressionEngine,
    ProgressionRecord,
};

/// Small deterministic generator so sequences are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

fn random_action(rng: &mut Lcg, config: &ProgressionConfig) -> ProgressionAction {
    let levels = [
        ProgressionConfig::OFFICE_INFERNO,
        ProgressionConfig::WELLNESS_WHIRLWIND,
        ProgressionConfig::SISTERHOOD_SUMMIT,
    ];
    let kinds = [ContentKind::Meme, ContentKind::Tweet, ContentKind::VideoScript];

    match rng.below(6) {
        0 => ProgressionAction::award_points(rng.below(120) as i64),
        1 => ProgressionAction::record_content(ContentEvent::for_kind(
            kinds[rng.below(3) as usize],
            &config.awards,
        )),
        2 => ProgressionAction::redeem_referral(),
        3 => ProgressionAction::complete_tutorial(),
        4 => ProgressionAction::complete_level(levels[rng.below(3) as usize]),
        _ => ProgressionAction::complete_challenge(
            ProgressionConfig::OFFICE_INFERNO,
            rng.below(4) as u32,
        ),
    }
}

#[test]
fn random_sequences_preserve_invariants() {
    let config = ProgressionConfig::default();
    let engine = ProgressionEngine::new(&config);

    for seed in 0..200 {
        let mut rng = Lcg(seed);
        let mut record = ProgressionRecord::new();

        for _ in 0..40 {
            let action = random_action(&mut rng, &config);
            let outcome = engine.apply(&record, &action).unwrap();
            let next = outcome.record;

            assert!(next.faith_points <= config.max_points);
            assert!(next.faith_points >= record.faith_points);
            assert!(record.unlocked_filters.is_subset(&next.unlocked_filters));
            assert!(record.completed_levels.is_subset(&next.completed_levels));
            assert!(!record.tutorial_completed || next.tutorial_completed);

            // Unlocks are recomputed from the current balance.
            for rule in &config.rewards {
                if rule.threshold_points <= next.faith_points {
                    assert!(next.has_filter(&rule.reward_id));
                }
            }

            record = next;
        }
    }
}

#[test]
fn award_never_exceeds_cap() {
    let config = ProgressionConfig::default();
    let engine = ProgressionEngine::new(&config);

    for start in (0..=777).step_by(37) {
        for amount in [0_i64, 1, 16, 17, 100, 776, 777, 10_000, i64::MAX] {
            let record = ProgressionRecord::new().with_points(start);
            let outcome = engine.award_points(&record, amount).unwrap();
            assert!(outcome.record.faith_points <= 777);
            assert_eq!(
                outcome.record.faith_points,
                (u64::from(start) + amount as u64).min(777) as u32
            );
        }
    }
}

#[test]
fn completing_twice_matches_completing_once() {
    let config = ProgressionConfig::default();
    let engine = ProgressionEngine::new(&config);

    for level in &config.levels {
        for start in [0, 99, 100, 250, 700, 777] {
            let record = ProgressionRecord::new().with_points(start);
            let once = engine.complete_level(&record, &level.level_id).unwrap();
            let twice = engine.complete_level(&once.record, &level.level_id).unwrap();

            assert_eq!(twice.record, once.record);
            assert_eq!(twice.result.award.points_awarded, 0);
        }
    }
}

#[test]
fn tweet_batch_can_cross_two_thresholds() {
    let config = ProgressionConfig::default();
    let engine = ProgressionEngine::new(&config);
    let record = ProgressionRecord::new()
        .with_points(145)
        .with_filter("Glamour Wings");

    let outcome = engine
        .record_content(&record, ContentEvent::tweet_batch(&config.awards))
        .unwrap();

    // 145 + 30 = 175 crosses Dreamy Halo (150) only.
    assert_eq!(outcome.result.newly_unlocked.len(), 1);

    let record = ProgressionRecord::new().with_points(95);
    let outcome = engine.award_points(&record, 60).unwrap();
    let unlocked: Vec<&str> = outcome
        .result
        .newly_unlocked
        .iter()
        .map(|id| id.as_str())
        .collect();
    assert_eq!(unlocked, ["Glamour Wings", "Dreamy Halo"]);
}

#[test]
fn full_journey_reaches_every_level() {
    let config = ProgressionConfig::default();
    let engine = ProgressionEngine::new(&config);
    let summit = LevelId::from(ProgressionConfig::SISTERHOOD_SUMMIT);

    let mut record = engine
        .complete_tutorial(&ProgressionRecord::new())
        .unwrap()
        .record;
    record = engine
        .complete_level(&record, &LevelId::from(ProgressionConfig::OFFICE_INFERNO))
        .unwrap()
        .record;
    assert!(!engine.is_level_unlocked(&record, &summit).unwrap());

    record = engine
        .complete_level(&record, &LevelId::from(ProgressionConfig::WELLNESS_WHIRLWIND))
        .unwrap()
        .record;
    while !engine.is_level_unlocked(&record, &summit).unwrap() {
        record = engine
            .record_content(&record, ContentEvent::meme(&config.awards))
            .unwrap()
            .record;
    }

    let outcome = engine.complete_level(&record, &summit).unwrap();
    assert_eq!(outcome.record.completed_levels.len(), 3);
    assert_eq!(outcome.record.unlocked_filters.len(), 4);
}

#[cfg(feature = "serde")]
#[test]
fn record_accepts_legacy_field_names() {
    let json = r#"{
        "faith_points": 120,
        "unlocked_filters": ["Glamour Wings"],
        "completed_levels": [],
        "completed_tutorial": true
    }"#;

    let record: ProgressionRecord = serde_json::from_str(json).unwrap();

    assert!(record.tutorial_completed);
    assert_eq!(record.faith_points, 120);
}
