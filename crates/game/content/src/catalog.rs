//! Validated bundle of progression rules and challenge scripts.

use clouds_core::{Challenge, LevelId, ProgressionConfig};

use crate::loaders::{ChallengeLoader, ConfigLoader, LoadResult};

const BUILTIN_CONFIG: &str = include_str!("../data/progression.toml");
const BUILTIN_CHALLENGES: &[&str] = &[include_str!("../data/challenges/office_inferno.ron")];

/// Rules plus the scripts for quiz-style levels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    config: ProgressionConfig,
    challenges: Vec<Challenge>,
}

impl Catalog {
    /// Bundles rules and scripts, checking that they agree.
    ///
    /// Each script must belong to a configured level with challenge scoring
    /// and have exactly as many prompts as that scoring has questions.
    pub fn new(config: ProgressionConfig, challenges: Vec<Challenge>) -> LoadResult<Self> {
        config.validate()?;

        for (index, challenge) in challenges.iter().enumerate() {
            if challenges[..index]
                .iter()
                .any(|other| other.level_id == challenge.level_id)
            {
                anyhow::bail!("challenge '{}' is defined more than once", challenge.level_id);
            }

            let level = config.level(&challenge.level_id).ok_or_else(|| {
                anyhow::anyhow!("challenge '{}' has no configured level", challenge.level_id)
            })?;
            let scoring = level.challenge.ok_or_else(|| {
                anyhow::anyhow!(
                    "level '{}' has a challenge script but no challenge scoring",
                    challenge.level_id
                )
            })?;
            if challenge.len() != scoring.questions as usize {
                anyhow::bail!(
                    "challenge '{}' has {} prompts but scoring expects {}",
                    challenge.level_id,
                    challenge.len(),
                    scoring.questions
                );
            }
        }

        Ok(Self { config, challenges })
    }

    /// The catalog shipped inside this crate.
    pub fn builtin() -> LoadResult<Self> {
        let config = ConfigLoader::parse(BUILTIN_CONFIG)?;
        let challenges = BUILTIN_CHALLENGES
            .iter()
            .map(|source| ChallengeLoader::parse(source))
            .collect::<LoadResult<Vec<_>>>()?;
        Self::new(config, challenges)
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn into_config(self) -> ProgressionConfig {
        self.config
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn challenge(&self, level: &LevelId) -> Option<&Challenge> {
        self.challenges
            .iter()
            .find(|challenge| &challenge.level_id == level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_matches_default_rules() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.config(), &ProgressionConfig::default());
    }

    #[test]
    fn builtin_office_inferno_script() {
        let catalog = Catalog::builtin().unwrap();
        let challenge = catalog
            .challenge(&LevelId::from(ProgressionConfig::OFFICE_INFERNO))
            .unwrap();

        assert_eq!(challenge.len(), 3);
        assert_eq!(challenge.score(&[1, 1, 1]).unwrap(), 3);
        assert_eq!(challenge.score(&[0, 0, 0]).unwrap(), 0);
    }

    #[test]
    fn rejects_script_for_unscored_level() {
        let mut challenge = Catalog::builtin().unwrap().challenges()[0].clone();
        challenge.level_id = LevelId::from(ProgressionConfig::WELLNESS_WHIRLWIND);

        let err = Catalog::new(ProgressionConfig::default(), vec![challenge]).unwrap_err();
        assert!(err.to_string().contains("no challenge scoring"));
    }

    #[test]
    fn rejects_prompt_count_mismatch() {
        let mut challenge = Catalog::builtin().unwrap().challenges()[0].clone();
        challenge.prompts.pop();

        let err = Catalog::new(ProgressionConfig::default(), vec![challenge]).unwrap_err();
        assert!(err.to_string().contains("2 prompts"));
    }
}
