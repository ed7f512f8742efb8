//! Repository layer for per-user progression records.
//!
//! Records are the only data that CHANGES at runtime. Static rules (rewards,
//! levels, challenges) come from `clouds-content`, not from repositories.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::FileProgressionRepository;
pub use memory::InMemoryProgressionRepo;
pub use traits::ProgressionRepository;
pub use types::{UserId, Versioned};
