//! Identifiers and envelopes shared by repository implementations.

use std::fmt;

use clouds_core::ProgressionRecord;
use serde::{Deserialize, Serialize};

/// Opaque identifier of an angel sister (user).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem-safe encoding of the id.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.as_bytes())
    }

    /// Inverse of [`UserId::to_hex`]. Returns `None` for malformed input.
    pub fn from_hex(encoded: &str) -> Option<Self> {
        let bytes = hex::decode(encoded).ok()?;
        String::from_utf8(bytes).ok().map(Self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A stored record together with its write version.
///
/// Version 1 is assigned on create; each successful update adds one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned {
    pub version: u64,
    pub record: ProgressionRecord,
}

impl Versioned {
    pub const INITIAL_VERSION: u64 = 1;

    pub fn initial(record: ProgressionRecord) -> Self {
        Self {
            version: Self::INITIAL_VERSION,
            record,
        }
    }

    /// The envelope written by a successful update on top of `self`.
    pub fn next(&self, record: ProgressionRecord) -> Self {
        Self {
            version: self.version + 1,
            record,
        }
    }
}
