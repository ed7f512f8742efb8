//! Repository contract for per-user progression records.

use clouds_core::ProgressionRecord;

use super::{Result, UserId, Versioned};

/// Persistence collaborator for progression records.
///
/// Writes are compare-and-swap on the record version so that concurrent
/// read-modify-write cycles cannot silently overwrite each other.
pub trait ProgressionRepository: Send + Sync {
    /// Load the latest record for a user.
    fn get(&self, user: &UserId) -> Result<Option<Versioned>>;

    /// Store a fresh record at version 1.
    ///
    /// Fails with `AlreadyExists` if the user already has a record.
    fn create(&self, user: &UserId, record: &ProgressionRecord) -> Result<Versioned>;

    /// Replace the record if its stored version still equals `expected_version`.
    ///
    /// Fails with `NotFound` when there is no record and with
    /// `VersionConflict` when another writer got there first.
    fn update(
        &self,
        user: &UserId,
        expected_version: u64,
        record: &ProgressionRecord,
    ) -> Result<Versioned>;

    /// Check if a user has a record.
    fn exists(&self, user: &UserId) -> Result<bool> {
        Ok(self.get(user)?.is_some())
    }

    /// List every stored user, sorted.
    fn list_users(&self) -> Result<Vec<UserId>>;
}
