//! Core TOML config loading: read from path or platform default.

use std::io::ErrorKind;
use std::path::Path;

use strix_common::ConfigError;
use tracing::{info, warn};

use crate::schema::StrixConfig;
use crate::validation;

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take their serde defaults, so partial files work. A
/// config that parses but fails validation is returned as-is with a
/// warning; only unreadable or unparseable files are errors.
pub fn load_from_path(path: &Path) -> Result<StrixConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("failed to read {}: {e}", path.display())),
    })?;

    let config: StrixConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}, keeping the parsed values");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/strix/config.toml`
/// On Linux: `~/.config/strix/config.toml`
///
/// A missing file is not an error: a commented default config is
/// written there and the defaults are returned.
pub fn load_default() -> Result<StrixConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(StrixConfig::default())
        }
        other => other,
    }
}
