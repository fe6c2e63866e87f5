//! Embedded engine configuration types.

use serde::{Deserialize, Serialize};

/// Settings passed to the embedded browser engine at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Target frame rate for windowless rendering, in frames per second.
    pub frame_rate: u32,
    /// Surface color shown while no size-matched frame is available,
    /// as `#rrggbb`.
    pub neutral_color: String,
    /// Pump cycles the simulated engine takes to finish a page load.
    pub sim_load_pumps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            neutral_color: "#1e1e1e".into(),
            sim_load_pumps: 3,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.neutral_color, "#1e1e1e");
        assert_eq!(config.sim_load_pumps, 3);
    }

    #[test]
    fn engine_config_partial_toml() {
        let toml_str = r#"
frame_rate = 60
"#;
        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.neutral_color, "#1e1e1e");
    }
}
