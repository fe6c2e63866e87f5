//! Window configuration types.

use serde::{Deserialize, Serialize};

/// Window appearance and behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Static window title.
    pub title: String,
    /// Initial window width in logical pixels.
    pub width: u32,
    /// Initial window height in logical pixels.
    pub height: u32,
    /// Update the title bar with the active tab's document title.
    pub dynamic_title: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Strix".into(),
            width: 1024,
            height: 768,
            dynamic_title: true,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
