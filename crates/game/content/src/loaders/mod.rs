//! Content loaders for reading catalog data from files.
//!
//! Progression rules are TOML, challenge scripts are RON. Every loader
//! validates what it reads so a bad file fails at startup, not mid-game.

pub mod challenge;
pub mod config;
pub mod factory;

pub use challenge::ChallengeLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
