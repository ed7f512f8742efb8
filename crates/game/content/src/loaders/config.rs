//! Progression rules loader.

use std::path::Path;

use clouds_core::ProgressionConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`ProgressionConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate progression rules from a TOML file.
    pub fn load(path: &Path) -> LoadResult<ProgressionConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid progression config {}: {}", path.display(), e))
    }

    /// Parse and validate progression rules from TOML text.
    pub fn parse(content: &str) -> LoadResult<ProgressionConfig> {
        let config: ProgressionConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        config.validate()?;
        Ok(config)
    }
}
