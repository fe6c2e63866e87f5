//! The tab lifecycle manager.
//!
//! `TabShell` owns the registry, the per-tab render surfaces, the host
//! binding, and the engine handle, and composes them into the tab
//! operations front-ends call. It lives on the UI thread; everything
//! arriving from engine threads reaches it through the dispatcher
//! queue drained in [`tick`](TabShell::tick).

mod callbacks;
mod lifecycle;
mod navigation;
mod shutdown;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use strix_common::errors::StrixError;
use strix_common::events::{EventBus, ShellEvent};
use strix_common::geometry::LogicalSize;
use strix_common::id::{BrowserId, RequestId, TabId};
use strix_engine::api::BrowserEngine;
use strix_surface::{RenderSurface, SoftwareSurface};

use crate::dispatch::{QueueDispatcher, SessionHandle, SessionToken};
use crate::host::{HostEvent, SurfaceHost};
use crate::registry::{TabRegistry, TabSummary};
use crate::resize::ResizeDirective;
use crate::suppress::SignalSuppression;

/// Tuning knobs for one session, mapped from the config file by the
/// binary.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub homepage: String,
    pub max_tabs: usize,
    pub resize_tolerance_px: i32,
    pub script_eval_timeout: Duration,
    pub page_load_timeout: Duration,
    pub initial_view: LogicalSize,
    pub frame_rate: u32,
    pub background_rgb: [u8; 3],
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            homepage: "about:blank".to_string(),
            max_tabs: 32,
            resize_tolerance_px: 2,
            script_eval_timeout: Duration::from_millis(5_000),
            page_load_timeout: Duration::from_millis(15_000),
            initial_view: LogicalSize::new(1024, 768),
            frame_rate: 30,
            background_rgb: [0x1e, 0x1e, 0x1e],
        }
    }
}

type SurfaceFactory = Box<dyn Fn() -> Box<dyn RenderSurface>>;

pub struct TabShell {
    pub(crate) settings: SessionSettings,
    pub(crate) registry: TabRegistry,
    pub(crate) engine: Arc<dyn BrowserEngine>,
    pub(crate) host: Box<dyn SurfaceHost>,
    pub(crate) dispatcher: Arc<QueueDispatcher>,
    pub(crate) suppression: SignalSuppression,
    /// Render surfaces by tab id. Kept beside the registry rather than
    /// inside it so presentation never happens under the registry lock.
    pub(crate) surfaces: HashMap<TabId, Box<dyn RenderSurface>>,
    surface_factory: SurfaceFactory,
    /// In-flight script requests: `None` until the engine's result
    /// callback fills the slot.
    pub(crate) pending_scripts: HashMap<RequestId, Option<serde_json::Value>>,
    pub(crate) bus: EventBus,
    /// Dropped at shutdown, which voids every queued dispatcher task.
    token: Option<Arc<SessionToken>>,
    next_tab_id: u32,
    pub(crate) view_size: LogicalSize,
    pub(crate) scale_factor: f64,
    pub(crate) window_close_requested: bool,
    pub(crate) shut_down: bool,
}

impl TabShell {
    pub fn new(
        settings: SessionSettings,
        engine: Arc<dyn BrowserEngine>,
        host: Box<dyn SurfaceHost>,
        dispatcher: Arc<QueueDispatcher>,
        suppression: SignalSuppression,
    ) -> Self {
        let background = settings.background_rgb;
        Self {
            settings,
            registry: TabRegistry::new(),
            engine,
            host,
            dispatcher,
            suppression,
            surfaces: HashMap::new(),
            surface_factory: Box::new(move || Box::new(SoftwareSurface::new(background))),
            pending_scripts: HashMap::new(),
            bus: EventBus::new(64),
            token: Some(SessionToken::new()),
            next_tab_id: 1,
            view_size: LogicalSize::new(0, 0),
            scale_factor: 1.0,
            window_close_requested: false,
            shut_down: false,
        }
    }

    /// Replaces how render surfaces are made. Used by tests to inject
    /// failing surfaces.
    pub fn with_surface_factory(
        mut self,
        factory: impl Fn() -> Box<dyn RenderSurface> + 'static,
    ) -> Self {
        self.surface_factory = Box::new(factory);
        self
    }

    pub(crate) fn make_surface(&self) -> Box<dyn RenderSurface> {
        (self.surface_factory)()
    }

    // -------------------------------------------------------------------------
    // Event-loop integration
    // -------------------------------------------------------------------------

    /// One cooperative iteration: pump the engine (which fires hooks
    /// into the dispatcher), run the queued UI tasks, then apply host
    /// notifications.
    pub fn tick(&mut self) {
        self.engine.pump();
        let dispatcher = self.dispatcher.clone();
        dispatcher.drain(self);
        self.process_host_events();
    }

    /// Applies notifications the host binding queued since the last
    /// drain.
    pub fn process_host_events(&mut self) {
        for event in self.host.drain_events() {
            match event {
                HostEvent::PageChanged(index) => {
                    if self.registry.active_index() != Some(index) {
                        self.switch_tab(index);
                    }
                }
                HostEvent::CloseRequested => {
                    self.shutdown();
                }
            }
        }
    }

    /// Feeds a window resize to the active tab's controller and the
    /// engine. Degenerate pre-layout sizes are dropped here.
    pub fn handle_view_resize(&mut self, size: LogicalSize, scale_factor: f64) {
        if size.is_degenerate() {
            tracing::debug!(width = size.width, height = size.height, "degenerate resize ignored");
            return;
        }
        self.view_size = size;
        self.scale_factor = scale_factor;
        self.sync_active_view();
    }

    /// Forwards a window focus change to the active tab's browser.
    /// Background tabs never hold focus, so only the active one is
    /// told.
    pub fn handle_focus_changed(&mut self, focused: bool) {
        if let Some(attachment) = self
            .registry
            .with_active_mut(|tab| tab.browser.clone())
            .flatten()
        {
            attachment.host.set_focus(focused);
        }
    }

    /// Re-requests the current view size for the active tab. Called on
    /// switches, mirroring the resize event a toolkit delivers to a
    /// freshly shown widget.
    pub(crate) fn sync_active_view(&mut self) {
        let size = self.view_size;
        let scale_factor = self.scale_factor;
        if size.is_degenerate() {
            return;
        }
        let outcome = self.registry.with_active_mut(|tab| {
            (
                tab.resize.on_widget_resize(size),
                tab.browser.as_ref().map(|b| b.browser_id),
            )
        });
        if let Some((ResizeDirective::NotifyEngine(size), Some(browser_id))) = outcome {
            self.engine.resize(browser_id, size, scale_factor);
        }
    }

    // -------------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------------

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn tabs(&self) -> Vec<TabSummary> {
        self.registry.summaries()
    }

    pub fn tab_count(&self) -> usize {
        self.registry.len()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.registry.active_index()
    }

    pub fn active_tab(&self) -> Option<TabSummary> {
        let index = self.registry.active_index()?;
        self.registry.summaries().into_iter().nth(index)
    }

    pub fn tab_id_at(&self, index: usize) -> Option<TabId> {
        self.registry.id_at(index)
    }

    pub fn browser_id_of(&self, tab_id: TabId) -> Option<BrowserId> {
        self.registry
            .with_tab(tab_id, |t| t.browser.as_ref().map(|b| b.browser_id))
            .flatten()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn window_close_requested(&self) -> bool {
        self.window_close_requested
    }

    /// Weak handle tasks carry to prove the session is still alive at
    /// execution time.
    pub fn session_handle(&self) -> SessionHandle {
        match &self.token {
            Some(token) => SessionHandle::of(token),
            None => SessionHandle::dead(),
        }
    }

    pub(crate) fn drop_session_token(&mut self) {
        self.token = None;
    }

    pub(crate) fn publish(&self, event: ShellEvent) {
        self.bus.publish(event);
    }

    // -------------------------------------------------------------------------
    // Presentation
    // -------------------------------------------------------------------------

    /// Presents the active tab's surface. Called by front-ends on their
    /// redraw cadence.
    pub fn render_active(&mut self) -> Result<(), StrixError> {
        let Some(tab_id) = self.registry.active_id() else {
            return Ok(());
        };
        match self.surfaces.get_mut(&tab_id) {
            Some(surface) => surface
                .render()
                .map_err(|e| StrixError::Surface(e.to_string())),
            None => Ok(()),
        }
    }

    /// PNG of what a tab's surface is currently showing.
    pub fn screenshot_tab(&self, tab_id: TabId) -> Result<Vec<u8>, StrixError> {
        match self.surfaces.get(&tab_id) {
            Some(surface) => surface
                .take_screenshot()
                .map_err(|e| StrixError::Surface(e.to_string())),
            None => Err(StrixError::Surface(format!("no surface for {tab_id}"))),
        }
    }

    pub fn screenshot_active(&self) -> Result<Vec<u8>, StrixError> {
        match self.registry.active_id() {
            Some(tab_id) => self.screenshot_tab(tab_id),
            None => Err(StrixError::Surface("no active tab".to_string())),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
