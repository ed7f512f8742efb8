//! Runtime settings loaded from the environment.
use std::env;
use std::path::PathBuf;

use crate::events::EventBus;

/// Knobs for the progression service and its storage.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Read-modify-write attempts before giving up on version conflicts.
    pub max_attempts: u32,
    pub event_buffer_size: usize,
    /// Directory holding per-user record files.
    pub data_dir: Option<PathBuf>,
    /// Custom `progression.toml`; the built-in catalog is used otherwise.
    pub catalog_path: Option<PathBuf>,
}

impl RuntimeConfig {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;

    /// Construct configuration from process environment variables.
    ///
    /// - `CLOUDS_MAX_ATTEMPTS` (default: 8)
    /// - `CLOUDS_EVENT_BUFFER` (default: 100)
    /// - `CLOUDS_DATA_DIR`
    /// - `CLOUDS_CATALOG`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(attempts) = read_env::<u32>("CLOUDS_MAX_ATTEMPTS") {
            config.max_attempts = attempts.max(1);
        }

        if let Some(capacity) = read_env::<usize>("CLOUDS_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        config.data_dir = env::var_os("CLOUDS_DATA_DIR").map(PathBuf::from);
        config.catalog_path = env::var_os("CLOUDS_CATALOG").map(PathBuf::from);

        config
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            event_buffer_size: EventBus::DEFAULT_CAPACITY,
            data_dir: None,
            catalog_path: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
