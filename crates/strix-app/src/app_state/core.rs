//! StrixApp struct definition and constructor.

use std::sync::Arc;
use std::time::Instant;

use winit::window::Window;

use strix_common::geometry::LogicalSize;
use strix_config::StrixConfig;
use strix_session::TabShell;

use super::host::WinitHost;

/// Top-level application state.
pub struct StrixApp {
    pub(super) config: StrixConfig,
    pub(super) startup_urls: Vec<String>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,

    // Tab session (built once the window exists)
    pub(super) shell: Option<TabShell>,
    pub(super) host: Option<WinitHost>,

    // Modifier tracking (winit sends these separately)
    pub(super) modifiers: winit::keyboard::ModifiersState,
    // Last cursor position in physical pixels
    pub(super) cursor_pos: (f64, f64),

    pub(super) last_title: String,
    pub(super) last_poll: Instant,
}

impl StrixApp {
    pub fn new(config: StrixConfig, startup_urls: Vec<String>) -> Self {
        Self {
            config,
            startup_urls,
            window: None,
            shell: None,
            host: None,
            modifiers: winit::keyboard::ModifiersState::empty(),
            cursor_pos: (0.0, 0.0),
            last_title: String::new(),
            last_poll: Instant::now(),
        }
    }
}

/// Converts a physical window size to the logical view size the
/// session tracks.
pub(super) fn logical_view(size: winit::dpi::PhysicalSize<u32>, scale_factor: f64) -> LogicalSize {
    LogicalSize::new(
        (size.width as f64 / scale_factor).round() as i32,
        (size.height as f64 / scale_factor).round() as i32,
    )
}
