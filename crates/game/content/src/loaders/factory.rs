//! Content factory for building a catalog from a data directory.

use std::path::{Path, PathBuf};

use clouds_core::{Challenge, ProgressionConfig};

use crate::catalog::Catalog;
use crate::loaders::{ChallengeLoader, ConfigLoader, LoadResult};

/// Content factory that loads all progression content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── progression.toml
/// └── challenges/
///     └── office_inferno.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load progression rules from `progression.toml`.
    pub fn load_config(&self) -> LoadResult<ProgressionConfig> {
        ConfigLoader::load(&self.data_dir.join("progression.toml"))
    }

    /// Load every `*.ron` script under `challenges/`, sorted by file name.
    ///
    /// A missing `challenges/` directory yields no scripts.
    pub fn load_challenges(&self) -> LoadResult<Vec<Challenge>> {
        let dir = self.data_dir.join("challenges");
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                paths.push(path);
            }
        }
        paths.sort();

        paths.iter().map(|path| ChallengeLoader::load(path)).collect()
    }

    /// Load and cross-validate the whole catalog.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        Catalog::new(self.load_config()?, self.load_challenges()?)
    }
}
