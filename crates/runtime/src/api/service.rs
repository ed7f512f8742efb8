//! Progression service: optimistic read-modify-write over a repository.

use std::sync::Arc;

use clouds_core::{
    ActionResult, ContentEvent, ContentKind, FaithMeter, LevelId, LevelStatus, Outcome,
    ProgressionAction, ProgressionConfig, ProgressionEngine, ProgressionRecord,
};

use super::{Result, ServiceError};
use crate::config::RuntimeConfig;
use crate::events::{EventBus, ProgressionEvent};
use crate::repository::{ProgressionRepository, RepositoryError, UserId, Versioned};

/// A committed (or no-op) action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    /// Stored record after the action. Unchanged version for no-ops.
    pub stored: Versioned,
    pub result: ActionResult,
    /// Read-modify-write cycles it took, starting at 1.
    pub attempts: u32,
}

impl Applied {
    pub fn record(&self) -> &ProgressionRecord {
        &self.stored.record
    }
}

/// One row of the level board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelOverview {
    pub level: LevelId,
    pub unlock_threshold: u32,
    pub status: LevelStatus,
}

/// Drives engine actions against stored records.
///
/// Each action reads the latest versioned record, runs it through the engine
/// and writes back with the version it read. A version conflict restarts the
/// cycle, up to `max_attempts` times. Engine failures are returned at once.
#[derive(Clone)]
pub struct ProgressionService {
    repository: Arc<dyn ProgressionRepository>,
    config: Arc<ProgressionConfig>,
    events: EventBus,
    max_attempts: u32,
}

impl ProgressionService {
    pub fn new(repository: Arc<dyn ProgressionRepository>, config: ProgressionConfig) -> Self {
        Self {
            repository,
            config: Arc::new(config),
            events: EventBus::new(),
            max_attempts: RuntimeConfig::DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Builds a service using the attempt limit and event buffer from `runtime`.
    pub fn with_runtime_config(
        repository: Arc<dyn ProgressionRepository>,
        config: ProgressionConfig,
        runtime: &RuntimeConfig,
    ) -> Self {
        Self::new(repository, config)
            .with_event_bus(EventBus::with_capacity(runtime.event_buffer_size))
            .with_max_attempts(runtime.max_attempts)
    }

    #[must_use]
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    /// Attempt limit for conflicting writes. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn engine(&self) -> ProgressionEngine<'_> {
        ProgressionEngine::new(&self.config)
    }

    /// Latest stored record, created with empty defaults on first access.
    pub fn load_or_create(&self, user: &UserId) -> Result<Versioned> {
        if let Some(stored) = self.repository.get(user)? {
            return Ok(stored);
        }

        match self.repository.create(user, &ProgressionRecord::new()) {
            Ok(stored) => {
                tracing::debug!("Created progression record for {}", user);
                Ok(stored)
            }
            // Another writer created it between our read and create.
            Err(RepositoryError::AlreadyExists(_)) => self
                .repository
                .get(user)?
                .ok_or_else(|| RepositoryError::NotFound(user.clone()).into()),
            Err(err) => Err(err.into()),
        }
    }

    /// Stores a fresh record for a new user.
    ///
    /// Fails with `AlreadyExists` when the user already has one.
    pub fn create(&self, user: &UserId) -> Result<Versioned> {
        let stored = self.repository.create(user, &ProgressionRecord::new())?;
        tracing::info!("Created progression record for {}", user);
        Ok(stored)
    }

    /// Applies an action with bounded optimistic retries.
    pub fn apply(&self, user: &UserId, action: &ProgressionAction) -> Result<Applied> {
        let engine = self.engine();

        for attempt in 1..=self.max_attempts {
            let current = self.load_or_create(user)?;
            let Outcome { record, result } = engine.apply(&current.record, action)?;

            if record == current.record {
                return Ok(Applied {
                    stored: current,
                    result,
                    attempts: attempt,
                });
            }

            match self.repository.update(user, current.version, &record) {
                Ok(stored) => {
                    self.publish(user, &stored, &result);
                    return Ok(Applied {
                        stored,
                        result,
                        attempts: attempt,
                    });
                }
                Err(err) if err.is_conflict() => {
                    tracing::warn!(
                        "{} for {} conflicted on attempt {}/{}: {}",
                        action.as_str(),
                        user,
                        attempt,
                        self.max_attempts,
                        err
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(ServiceError::RetriesExhausted {
            user: user.clone(),
            attempts: self.max_attempts,
        })
    }

    fn publish(&self, user: &UserId, stored: &Versioned, result: &ActionResult) {
        let award = result.award();
        if award.points_awarded > 0 {
            self.events.publish(ProgressionEvent::PointsAwarded {
                user: user.clone(),
                points: award.points_awarded,
                total: stored.record.faith_points,
            });
        }

        for reward in &award.newly_unlocked {
            tracing::info!("{} unlocked {}", user, reward);
            self.events.publish(ProgressionEvent::RewardUnlocked {
                user: user.clone(),
                reward: reward.clone(),
            });
        }

        if let Some(level) = result.completed_level() {
            tracing::info!("{} completed {}", user, level);
            self.events.publish(ProgressionEvent::LevelCompleted {
                user: user.clone(),
                level: level.clone(),
            });
        }

        if result.completed_tutorial() {
            tracing::info!("{} completed the tutorial", user);
            self.events.publish(ProgressionEvent::TutorialCompleted { user: user.clone() });
        }
    }

    pub fn award_points(&self, user: &UserId, amount: i64) -> Result<Applied> {
        self.apply(user, &ProgressionAction::award_points(amount))
    }

    /// Awards the catalog points for one piece of generated content.
    pub fn record_content(&self, user: &UserId, kind: ContentKind) -> Result<Applied> {
        let event = ContentEvent::for_kind(kind, &self.config.awards);
        self.apply(user, &ProgressionAction::record_content(event))
    }

    pub fn redeem_referral(&self, user: &UserId) -> Result<Applied> {
        self.apply(user, &ProgressionAction::redeem_referral())
    }

    pub fn complete_tutorial(&self, user: &UserId) -> Result<Applied> {
        self.apply(user, &ProgressionAction::complete_tutorial())
    }

    pub fn complete_level(&self, user: &UserId, level: &LevelId) -> Result<Applied> {
        self.apply(user, &ProgressionAction::complete_level(level.clone()))
    }

    pub fn complete_challenge(
        &self,
        user: &UserId,
        level: &LevelId,
        correct_answers: u32,
    ) -> Result<Applied> {
        self.apply(
            user,
            &ProgressionAction::complete_challenge(level.clone(), correct_answers),
        )
    }

    pub fn faith_meter(&self, user: &UserId) -> Result<FaithMeter> {
        let stored = self.load_or_create(user)?;
        Ok(self.engine().faith_meter(&stored.record))
    }

    /// Status of every configured level, in configuration order.
    pub fn levels(&self, user: &UserId) -> Result<Vec<LevelOverview>> {
        let stored = self.load_or_create(user)?;
        let engine = self.engine();

        self.config
            .levels
            .iter()
            .map(|level| -> Result<LevelOverview> {
                Ok(LevelOverview {
                    level: level.level_id.clone(),
                    unlock_threshold: level.unlock_threshold,
                    status: engine.level_status(&stored.record, &level.level_id)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Topic;
    use crate::repository::InMemoryProgressionRepo;

    fn service() -> ProgressionService {
        ProgressionService::new(
            Arc::new(InMemoryProgressionRepo::new()),
            ProgressionConfig::default(),
        )
    }

    /// Repository whose first `conflicts` updates lose the race.
    struct Contended {
        inner: InMemoryProgressionRepo,
        conflicts: std::sync::atomic::AtomicU32,
    }

    impl ProgressionRepository for Contended {
        fn get(&self, user: &UserId) -> crate::repository::Result<Option<Versioned>> {
            self.inner.get(user)
        }

        fn create(
            &self,
            user: &UserId,
            record: &ProgressionRecord,
        ) -> crate::repository::Result<Versioned> {
            self.inner.create(user, record)
        }

        fn update(
            &self,
            user: &UserId,
            expected_version: u64,
            record: &ProgressionRecord,
        ) -> crate::repository::Result<Versioned> {
            use std::sync::atomic::Ordering;

            if self.conflicts.load(Ordering::SeqCst) > 0 {
                self.conflicts.fetch_sub(1, Ordering::SeqCst);
                return Err(RepositoryError::VersionConflict {
                    user: user.clone(),
                    expected: expected_version,
                    actual: expected_version + 1,
                });
            }
            self.inner.update(user, expected_version, record)
        }

        fn list_users(&self) -> crate::repository::Result<Vec<UserId>> {
            self.inner.list_users()
        }
    }

    fn contended(conflicts: u32) -> Arc<Contended> {
        Arc::new(Contended {
            inner: InMemoryProgressionRepo::new(),
            conflicts: conflicts.into(),
        })
    }

    #[test]
    fn first_access_creates_empty_record() {
        let stored = service().load_or_create(&UserId::from("ava")).unwrap();
        assert_eq!(stored, Versioned::initial(ProgressionRecord::new()));
    }

    #[test]
    fn award_is_persisted_and_published() {
        let service = service();
        let user = UserId::from("ava");
        let mut points = service.events().subscribe(Topic::Points);
        let mut milestones = service.events().subscribe(Topic::Milestones);

        service.award_points(&user, 90).unwrap();
        let applied = service.record_content(&user, ContentKind::Meme).unwrap();

        assert_eq!(applied.record().faith_points, 105);
        assert_eq!(applied.stored.version, 3);
        assert_eq!(
            points.try_recv().unwrap(),
            ProgressionEvent::PointsAwarded {
                user: user.clone(),
                points: 90,
                total: 90
            }
        );
        assert!(points.try_recv().is_ok());
        assert!(matches!(
            milestones.try_recv().unwrap(),
            ProgressionEvent::RewardUnlocked { reward, .. } if reward.as_str() == "Glamour Wings"
        ));
    }

    #[test]
    fn no_op_does_not_write() {
        let service = service();
        let user = UserId::from("ava");
        let level = LevelId::from(ProgressionConfig::OFFICE_INFERNO);

        let first = service.complete_level(&user, &level).unwrap();
        let second = service.complete_level(&user, &level).unwrap();

        assert_eq!(second.stored.version, first.stored.version);
        assert!(second.result.completed_level().is_none());
    }

    #[test]
    fn engine_errors_are_not_retried() {
        let repo = contended(0);
        let service = ProgressionService::new(repo, ProgressionConfig::default());

        let err = service
            .award_points(&UserId::from("ava"), -5)
            .unwrap_err();

        assert!(matches!(err, ServiceError::Engine(_)));
    }

    #[test]
    fn retries_through_conflicts() {
        let service = ProgressionService::new(contended(3), ProgressionConfig::default());

        let applied = service.award_points(&UserId::from("ava"), 10).unwrap();

        assert_eq!(applied.attempts, 4);
        assert_eq!(applied.record().faith_points, 10);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let service = ProgressionService::new(contended(10), ProgressionConfig::default())
            .with_max_attempts(2);

        let err = service.award_points(&UserId::from("ava"), 10).unwrap_err();

        assert!(matches!(
            err,
            ServiceError::RetriesExhausted { attempts: 2, .. }
        ));
    }

    #[test]
    fn level_board_reflects_progress() {
        let service = service();
        let user = UserId::from("ava");
        service.award_points(&user, 100).unwrap();

        let statuses: Vec<LevelStatus> = service
            .levels(&user)
            .unwrap()
            .into_iter()
            .map(|row| row.status)
            .collect();

        assert_eq!(
            statuses,
            [LevelStatus::Unlocked, LevelStatus::Unlocked, LevelStatus::Locked]
        );
    }
}
