//! File-based ProgressionRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clouds_core::ProgressionRecord;

use super::{ProgressionRepository, RepositoryError, Result, UserId, Versioned};

/// File-based implementation of ProgressionRepository.
///
/// # File Format
///
/// Each user is stored as `{hex(user_id)}.json` holding a pretty-printed
/// [`Versioned`] envelope. Writes go to a `.json.tmp` sibling first and are
/// moved into place with an atomic rename.
///
/// A process-wide mutex serializes compare-and-swap writes. Separate processes
/// sharing one directory are not coordinated.
pub struct FileProgressionRepository {
    base_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileProgressionRepository {
    /// Create a new file-based repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self {
            base_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a user's record file.
    fn record_path(&self, user: &UserId) -> PathBuf {
        self.base_dir.join(format!("{}.json", user.to_hex()))
    }

    fn read(&self, user: &UserId) -> Result<Option<Versioned>> {
        let path = self.record_path(user);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let stored: Versioned = serde_json::from_slice(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!(
            "Loaded record[{}] v{} from {}",
            user,
            stored.version,
            path.display()
        );

        Ok(Some(stored))
    }

    fn write(&self, user: &UserId, stored: &Versioned) -> Result<()> {
        let path = self.record_path(user);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(stored)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!(
            "Saved record[{}] v{} to {}",
            user,
            stored.version,
            path.display()
        );

        Ok(())
    }
}

impl ProgressionRepository for FileProgressionRepository {
    fn get(&self, user: &UserId) -> Result<Option<Versioned>> {
        self.read(user)
    }

    fn create(&self, user: &UserId, record: &ProgressionRecord) -> Result<Versioned> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        if self.record_path(user).exists() {
            return Err(RepositoryError::AlreadyExists(user.clone()));
        }

        let stored = Versioned::initial(record.clone());
        self.write(user, &stored)?;
        Ok(stored)
    }

    fn update(
        &self,
        user: &UserId,
        expected_version: u64,
        record: &ProgressionRecord,
    ) -> Result<Versioned> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let current = self
            .read(user)?
            .ok_or_else(|| RepositoryError::NotFound(user.clone()))?;
        if current.version != expected_version {
            return Err(RepositoryError::VersionConflict {
                user: user.clone(),
                expected: expected_version,
                actual: current.version,
            });
        }

        let stored = current.next(record.clone());
        self.write(user, &stored)?;
        Ok(stored)
    }

    fn exists(&self, user: &UserId) -> Result<bool> {
        Ok(self.record_path(user).exists())
    }

    fn list_users(&self) -> Result<Vec<UserId>> {
        let mut users = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(encoded) = filename.strip_suffix(".json")
                && let Some(user) = UserId::from_hex(encoded)
            {
                users.push(user);
            }
        }

        users.sort_unstable();
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_file_name_is_hex_encoded() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileProgressionRepository::new(dir.path()).unwrap();
        let user = UserId::from("../escape");

        repo.create(&user, &ProgressionRecord::new()).unwrap();

        let expected = dir.path().join(format!("{}.json", hex::encode("../escape")));
        assert!(expected.exists());
        assert_eq!(repo.list_users().unwrap(), vec![user]);
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileProgressionRepository::new(dir.path()).unwrap();
        let user = UserId::from("ava");

        let created = repo.create(&user, &ProgressionRecord::new()).unwrap();
        repo.update(&user, created.version, &ProgressionRecord::new().with_points(20))
            .unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileProgressionRepository::new(dir.path()).unwrap();
        let user = UserId::from("ava");
        fs::write(dir.path().join(format!("{}.json", user.to_hex())), "not json").unwrap();

        let err = repo.get(&user).unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }
}
