use std::sync::Arc;

use strix_common::geometry::LogicalSize;
use strix_common::id::{BrowserId, RequestId};
use thiserror::Error;

use crate::hooks::EngineHooks;
use crate::input::{KeyEvent, MouseEvent};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine is shut down")]
    ShutDown,

    #[error("browser creation rejected: {0}")]
    Rejected(String),
}

/// Parameters for a new browser instance.
#[derive(Debug, Clone)]
pub struct BrowserSpec {
    pub url: String,
    pub logical_size: LogicalSize,
    pub scale_factor: f64,
    pub frame_rate: u32,
    /// Solid color painted where the page has no content yet.
    pub background_rgb: [u8; 3],
}

/// The embedded browser engine.
///
/// All methods take `&self`; implementations guard their state
/// internally. Navigation commands on an unknown browser id are silent
/// no-ops with a debug log: commands routinely race with tab closure,
/// and a browser that is already gone is not an error.
pub trait BrowserEngine: Send + Sync {
    /// Creates a browser and registers its callback hooks. Returns the
    /// engine-assigned id and the per-browser host object.
    fn create_browser(
        &self,
        spec: BrowserSpec,
        hooks: EngineHooks,
    ) -> Result<(BrowserId, Arc<dyn BrowserHost>), EngineError>;

    /// Closes a browser instance. After this returns no further hooks
    /// fire for the id.
    fn close_browser(&self, id: BrowserId, force: bool);

    fn navigate(&self, id: BrowserId, url: &str);
    fn go_back(&self, id: BrowserId);
    fn go_forward(&self, id: BrowserId);
    fn reload(&self, id: BrowserId);
    fn stop_load(&self, id: BrowserId);

    /// Tells the engine the browser's logical view size changed. The
    /// engine answers asynchronously with a paint at the new physical
    /// size.
    fn resize(&self, id: BrowserId, size: LogicalSize, scale_factor: f64);

    /// Submits a script for evaluation. The result arrives through the
    /// script-result hook tagged with `request`.
    fn evaluate_script(&self, id: BrowserId, request: RequestId, code: &str);

    /// Abandons an in-flight script request. Its result hook never
    /// fires.
    fn cancel_script(&self, request: &RequestId);

    /// Runs one iteration of the engine's message loop.
    fn pump(&self);

    /// Tears the engine down. Further `create_browser` calls fail with
    /// [`EngineError::ShutDown`].
    fn shutdown(&self);
}

/// Per-browser host object handed out by `create_browser`.
///
/// The browser's lifetime stays with the engine; holding the host does
/// not keep the browser alive. Calls on a host whose browser has
/// closed are silent no-ops.
pub trait BrowserHost: Send + Sync {
    /// Hides or shows the browser. Hidden browsers produce no paints.
    fn was_hidden(&self, hidden: bool);

    fn set_focus(&self, focus: bool);

    /// Forces a repaint on the next engine pump.
    fn invalidate(&self);

    fn send_mouse_event(&self, event: MouseEvent);
    fn send_key_event(&self, event: KeyEvent);
}

impl std::fmt::Debug for dyn BrowserHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn BrowserHost")
    }
}
