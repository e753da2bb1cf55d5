//! User-level configuration (~/.config/tannhauser-tasks/config.toml)
//!
//! Machine-specific settings that should NOT be committed to version control,
//! such as a type checker living inside a particular virtualenv. Uses the same
//! `[tools]` schema as the project config.

use crate::error::Result;
use crate::project::config::{load_config_file, Config};
use std::path::PathBuf;

/// Get the user config directory path.
///
/// Returns `~/.config/tannhauser-tasks/` on Unix and `%APPDATA%\tannhauser-tasks\` on Windows.
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tannhauser-tasks"))
}

/// Get the user config file path.
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|p| p.join("config.toml"))
}

/// Load user configuration.
///
/// Returns `None` if the config file doesn't exist.
/// Returns an error if the file exists but is invalid TOML.
pub fn load_user_config() -> Result<Option<Config>> {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Ok(None),
    };

    if !config_path.exists() {
        return Ok(None);
    }

    tracing::debug!(path = %config_path.display(), "loading user config");
    load_config_file(&config_path).map(Some)
}
