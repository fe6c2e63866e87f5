//! Logging configuration types.

use serde::{Deserialize, Serialize};

/// Logging defaults. The CLI `--log-level` flag and `RUST_LOG` both override
/// the directive configured here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter directive.
    pub directive: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directive: "strix=info".into(),
        }
    }
}
