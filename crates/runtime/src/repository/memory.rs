//! In-memory ProgressionRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use clouds_core::ProgressionRecord;

use super::{ProgressionRepository, RepositoryError, Result, UserId, Versioned};

/// In-memory implementation of ProgressionRepository.
///
/// The write lock is held across the version check and the store, which makes
/// `update` an atomic compare-and-swap.
#[derive(Default)]
pub struct InMemoryProgressionRepo {
    records: RwLock<HashMap<UserId, Versioned>>,
}

impl InMemoryProgressionRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with records already stored at version 1.
    pub fn with_records(records: impl IntoIterator<Item = (UserId, ProgressionRecord)>) -> Self {
        let records = records
            .into_iter()
            .map(|(user, record)| (user, Versioned::initial(record)))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }
}

impl ProgressionRepository for InMemoryProgressionRepo {
    fn get(&self, user: &UserId) -> Result<Option<Versioned>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.get(user).cloned())
    }

    fn create(&self, user: &UserId, record: &ProgressionRecord) -> Result<Versioned> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        if records.contains_key(user) {
            return Err(RepositoryError::AlreadyExists(user.clone()));
        }

        let stored = Versioned::initial(record.clone());
        records.insert(user.clone(), stored.clone());
        Ok(stored)
    }

    fn update(
        &self,
        user: &UserId,
        expected_version: u64,
        record: &ProgressionRecord,
    ) -> Result<Versioned> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let current = records
            .get_mut(user)
            .ok_or_else(|| RepositoryError::NotFound(user.clone()))?;
        if current.version != expected_version {
            return Err(RepositoryError::VersionConflict {
                user: user.clone(),
                expected: expected_version,
                actual: current.version,
            });
        }

        *current = current.next(record.clone());
        Ok(current.clone())
    }

    fn list_users(&self) -> Result<Vec<UserId>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut users: Vec<UserId> = records.keys().cloned().collect();
        users.sort_unstable();
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_update_bumps_version() {
        let repo = InMemoryProgressionRepo::new();
        let user = UserId::from("ava");

        let created = repo.create(&user, &ProgressionRecord::new()).unwrap();
        let updated = repo
            .update(&user, created.version, &ProgressionRecord::new().with_points(15))
            .unwrap();

        assert_eq!(updated.version, 2);
        assert_eq!(repo.get(&user).unwrap(), Some(updated));
    }

    #[test]
    fn create_twice_fails() {
        let repo = InMemoryProgressionRepo::new();
        let user = UserId::from("ava");
        repo.create(&user, &ProgressionRecord::new()).unwrap();

        let err = repo.create(&user, &ProgressionRecord::new()).unwrap_err();
        assert!(matches!(err, RepositoryError::AlreadyExists(_)));
    }

    #[test]
    fn stale_update_conflicts() {
        let repo = InMemoryProgressionRepo::with_records([(
            UserId::from("ava"),
            ProgressionRecord::new(),
        )]);
        let user = UserId::from("ava");
        repo.update(&user, 1, &ProgressionRecord::new().with_points(10))
            .unwrap();

        let err = repo
            .update(&user, 1, &ProgressionRecord::new().with_points(20))
            .unwrap_err();

        assert!(matches!(
            err,
            RepositoryError::VersionConflict {
                expected: 1,
                actual: 2,
                ..
            }
        ));
        assert_eq!(repo.get(&user).unwrap().unwrap().record.faith_points, 10);
    }

    #[test]
    fn update_missing_user_fails() {
        let repo = InMemoryProgressionRepo::new();
        let err = repo
            .update(&UserId::from("ghost"), 1, &ProgressionRecord::new())
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }
}
