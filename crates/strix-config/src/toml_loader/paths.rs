//! Config path resolution and default file creation.

use std::path::{Path, PathBuf};

use strix_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

/// Platform-specific default config file path.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    match dirs::config_dir() {
        Some(dir) => Ok(dir.join("strix").join("config.toml")),
        None => Err(ConfigError::ParseError(
            "could not determine config directory".into(),
        )),
    }
}

/// Write the commented default config template to `path`, creating
/// parent directories as needed.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!("failed to create {}: {e}", parent.display()))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!("failed to write {}: {e}", path.display()))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}
