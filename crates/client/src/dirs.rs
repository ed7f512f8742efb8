//! Platform-specific directory utilities

use std::path::PathBuf;

/// Get the platform-specific data directory for progression records
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/clouds`
/// - Linux: `~/.local/share/clouds` (or `$XDG_DATA_HOME/clouds`)
/// - Windows: `%APPDATA%\clouds`
/// - Fallback: `./clouds_data`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "clouds")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./clouds_data"))
}

/// Resolve the records directory: flag, then environment, then platform default.
pub fn resolve_data_dir(flag: Option<PathBuf>, env: Option<PathBuf>) -> PathBuf {
    flag.or(env).unwrap_or_else(data_dir)
}
