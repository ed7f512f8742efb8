//! Data-driven progression content and loaders.
//!
//! This crate houses the shipped catalog and the loaders that read it:
//! - Progression rules: caps, bonuses, reward thresholds, levels (TOML)
//! - Challenge scripts for quiz-style levels (RON)
//!
//! Content is consumed by the runtime and never appears in user records.
//! Loaders deserialize straight into clouds-core types.

pub mod catalog;
pub mod loaders;

pub use catalog::Catalog;
pub use loaders::{ChallengeLoader, ConfigLoader, ContentFactory, LoadResult};
