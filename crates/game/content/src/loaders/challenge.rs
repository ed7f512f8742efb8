//! Challenge script loader.

use std::path::Path;

use clouds_core::Challenge;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`Challenge`] scripts from RON files.
pub struct ChallengeLoader;

impl ChallengeLoader {
    /// Load a challenge script from a RON file.
    pub fn load(path: &Path) -> LoadResult<Challenge> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid challenge {}: {}", path.display(), e))
    }

    /// Parse a challenge script from RON text.
    ///
    /// Every prompt must offer at least one healthy response, otherwise the
    /// level could never be aced.
    pub fn parse(content: &str) -> LoadResult<Challenge> {
        let challenge: Challenge = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse challenge RON: {}", e))?;

        if challenge.is_empty() {
            anyhow::bail!("challenge '{}' has no prompts", challenge.level_id);
        }
        for (index, prompt) in challenge.prompts.iter().enumerate() {
            if !prompt.responses.iter().any(|response| response.healthy) {
                anyhow::bail!(
                    "challenge '{}' prompt {} has no healthy response",
                    challenge.level_id,
                    index
                );
            }
        }

        Ok(challenge)
    }
}
