//! Configuration schema types for Strix.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with sensible defaults.

mod engine;
mod logging;
mod session;
mod window;

pub use engine::*;
pub use logging::*;
pub use session::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Strix.
///
/// All options have sensible defaults matching current behavior.
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct StrixConfig {
    pub window: WindowConfig,
    pub session: SessionConfig,
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
