//! Tab session configuration types.

use serde::{Deserialize, Serialize};

/// Tab session behavior: homepage, limits, and bounded-wait timeouts.
///
/// The two timeout values bound the only blocking-looking operations in the
/// coordinator; both return a distinguishable timeout failure when exceeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// URL loaded into a new tab when none is given.
    pub homepage: String,
    /// Maximum number of simultaneously open tabs.
    pub max_tabs: usize,
    /// Upper bound for "wait for JavaScript result" polls, in milliseconds.
    pub script_eval_timeout_ms: u64,
    /// Upper bound for "wait for load to complete" polls, in milliseconds.
    pub page_load_timeout_ms: u64,
    /// Paint/resize match tolerance in physical pixels (absorbs scale-factor
    /// rounding).
    pub resize_tolerance_px: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            homepage: "about:blank".into(),
            max_tabs: 32,
            script_eval_timeout_ms: 5_000,
            page_load_timeout_ms: 15_000,
            resize_tolerance_px: 2,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
