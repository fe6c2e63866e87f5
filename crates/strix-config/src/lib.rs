//! Strix configuration system.
//!
//! Provides TOML-based configuration with full validation. All config
//! sections use sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use strix_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod colors;
pub mod schema;
pub mod toml_loader;
pub mod validation;

// Re-export core types for convenience
pub use schema::{StrixConfig, CONFIG_SCHEMA_VERSION};

use strix_common::ConfigError;

/// Convenience function to load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a default
/// if none exists, and validates the result.
pub fn load_config() -> Result<StrixConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &StrixConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = StrixConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"window\""));
        assert!(json.contains("\"session\""));
        assert!(json.contains("\"engine\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = StrixConfig::default();
        let json = config_to_json(&config);
        let parsed: StrixConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.window.title, "Strix");
        assert_eq!(parsed.session.page_load_timeout_ms, 15_000);
        assert_eq!(parsed.session.script_eval_timeout_ms, 5_000);
    }

    #[test]
    fn default_config_passes_validation() {
        let config = StrixConfig::default();
        assert!(validation::validate(&config).is_ok());
    }
}
