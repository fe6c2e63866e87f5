//! Deterministic in-process engine.
//!
//! `SimEngine` implements the [`BrowserEngine`] boundary without any
//! real web content: loads complete after a configurable number of pump
//! cycles, paints are solid fills at `round(logical × scale)` physical
//! pixels, and script evaluation echoes JSON literals. Commands only
//! mutate state; every callback fires during [`pump`](BrowserEngine::pump),
//! from the pumping thread, after the engine lock is released.
//!
//! Marker URLs steer failure paths in tests and demos:
//! - [`HANG_URL`]-prefixed loads never finish;
//! - [`REJECT_URL`]-prefixed creations are rejected;
//! - scripts starting with [`SCRIPT_HANG`] never produce a result
//!   (until cancelled).

mod browser;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use strix_common::geometry::LogicalSize;
use strix_common::id::{BrowserId, RequestId};

use crate::api::{BrowserEngine, BrowserHost, BrowserSpec, EngineError};
use crate::hooks::EngineHooks;
use crate::input::{KeyEvent, MouseEvent};

use browser::{Delivery, SimBrowser};

/// Loads of URLs with this prefix never complete.
pub const HANG_URL: &str = "sim://hang";

/// Browser creation with this URL prefix is rejected.
pub const REJECT_URL: &str = "sim://reject";

/// Scripts with this prefix never deliver a result.
pub const SCRIPT_HANG: &str = "sim:hang";

struct EngineState {
    running: bool,
    next_browser_id: u32,
    load_pumps: u32,
    browsers: HashMap<BrowserId, SimBrowser>,
}

#[derive(Clone)]
pub struct SimEngine {
    inner: Arc<Mutex<EngineState>>,
}

/// Point-in-time view of one simulated browser, for assertions.
#[derive(Debug, Clone)]
pub struct SimBrowserInfo {
    pub url: String,
    pub title: String,
    pub loading: bool,
    pub hidden: bool,
    pub focused: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub logical_size: LogicalSize,
    pub scale_factor: f64,
    pub mouse_events: u64,
    pub key_events: u64,
    pub pending_scripts: usize,
}

impl SimEngine {
    /// `load_pumps` is how many pump cycles a navigation takes to
    /// finish loading.
    pub fn new(load_pumps: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(EngineState {
                running: true,
                next_browser_id: 1,
                load_pumps,
                browsers: HashMap::new(),
            })),
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.lock().map(|s| s.running).unwrap_or(false)
    }

    pub fn browser_count(&self) -> usize {
        self.inner.lock().map(|s| s.browsers.len()).unwrap_or(0)
    }

    pub fn browser_info(&self, id: BrowserId) -> Option<SimBrowserInfo> {
        let state = self.inner.lock().ok()?;
        let b = state.browsers.get(&id)?;
        let nav = b.loading_state();
        Some(SimBrowserInfo {
            url: b.url.clone(),
            title: b.title.clone(),
            loading: b.loading,
            hidden: b.hidden,
            focused: b.focused,
            can_go_back: nav.can_go_back,
            can_go_forward: nav.can_go_forward,
            logical_size: b.logical_size,
            scale_factor: b.scale_factor,
            mouse_events: b.mouse_events,
            key_events: b.key_events,
            pending_scripts: b.pending_script_count(),
        })
    }

    fn with_browser(&self, id: BrowserId, op: impl FnOnce(&mut SimBrowser)) {
        if let Ok(mut state) = self.inner.lock() {
            match state.browsers.get_mut(&id) {
                Some(browser) => op(browser),
                None => debug!(browser_id = %id, "command for unknown browser, dropping"),
            }
        }
    }
}

impl BrowserEngine for SimEngine {
    fn create_browser(
        &self,
        spec: BrowserSpec,
        hooks: EngineHooks,
    ) -> Result<(BrowserId, Arc<dyn BrowserHost>), EngineError> {
        let mut state = self.inner.lock().map_err(|_| EngineError::ShutDown)?;
        if !state.running {
            return Err(EngineError::ShutDown);
        }
        if spec.url.starts_with(REJECT_URL) {
            return Err(EngineError::Rejected(format!(
                "refused to create browser for {}",
                spec.url
            )));
        }

        let id = BrowserId(state.next_browser_id);
        state.next_browser_id += 1;
        let load_pumps = state.load_pumps;
        state
            .browsers
            .insert(id, SimBrowser::new(&spec, Arc::new(hooks), load_pumps));
        info!(browser_id = %id, url = %spec.url, "browser created");

        let host = Arc::new(SimBrowserHost {
            id,
            inner: self.inner.clone(),
        });
        Ok((id, host))
    }

    fn close_browser(&self, id: BrowserId, force: bool) {
        if let Ok(mut state) = self.inner.lock() {
            if state.browsers.remove(&id).is_some() {
                info!(browser_id = %id, force, "browser closed");
            } else {
                debug!(browser_id = %id, "close for unknown browser, dropping");
            }
        }
    }

    fn navigate(&self, id: BrowserId, url: &str) {
        self.with_browser(id, |b| b.begin_navigation(url, true));
    }

    fn go_back(&self, id: BrowserId) {
        self.with_browser(id, |b| b.go_back());
    }

    fn go_forward(&self, id: BrowserId) {
        self.with_browser(id, |b| b.go_forward());
    }

    fn reload(&self, id: BrowserId) {
        self.with_browser(id, |b| b.reload());
    }

    fn stop_load(&self, id: BrowserId) {
        self.with_browser(id, |b| b.stop_load());
    }

    fn resize(&self, id: BrowserId, size: LogicalSize, scale_factor: f64) {
        self.with_browser(id, |b| b.resize(size, scale_factor));
    }

    fn evaluate_script(&self, id: BrowserId, request: RequestId, code: &str) {
        self.with_browser(id, |b| b.submit_script(request, code));
    }

    fn cancel_script(&self, request: &RequestId) {
        if let Ok(mut state) = self.inner.lock() {
            for browser in state.browsers.values_mut() {
                browser.cancel_script(request);
            }
        }
    }

    fn pump(&self) {
        // Collect under the lock, fire after releasing it. A hook is
        // free to call back into the engine.
        let batches: Vec<(Arc<EngineHooks>, Vec<Delivery>)> = {
            let mut state = match self.inner.lock() {
                Ok(state) => state,
                Err(_) => return,
            };
            if !state.running {
                return;
            }
            let mut ids: Vec<BrowserId> = state.browsers.keys().copied().collect();
            ids.sort_by_key(|id| id.0);

            let mut batches = Vec::new();
            for id in ids {
                if let Some(browser) = state.browsers.get_mut(&id) {
                    let deliveries = browser.step();
                    if !deliveries.is_empty() {
                        batches.push((browser.hooks.clone(), deliveries));
                    }
                }
            }
            batches
        };

        for (hooks, deliveries) in batches {
            for delivery in deliveries {
                match delivery {
                    Delivery::Address(url) => hooks.emit_address_changed(&url),
                    Delivery::Loading(state) => hooks.emit_loading_state_changed(state),
                    Delivery::Title(title) => hooks.emit_title_changed(&title),
                    Delivery::PaintInvalidated => hooks.emit_paint_invalidated(),
                    Delivery::Paint(paint) => hooks.emit_paint(paint),
                    Delivery::ScriptResult(request, value) => {
                        hooks.emit_script_result(request, value)
                    }
                }
            }
        }
    }

    fn shutdown(&self) {
        if let Ok(mut state) = self.inner.lock() {
            if state.running {
                state.running = false;
                state.browsers.clear();
                info!("engine shut down");
            }
        }
    }
}

struct SimBrowserHost {
    id: BrowserId,
    inner: Arc<Mutex<EngineState>>,
}

impl SimBrowserHost {
    fn with_browser(&self, op: impl FnOnce(&mut SimBrowser)) {
        if let Ok(mut state) = self.inner.lock() {
            match state.browsers.get_mut(&self.id) {
                Some(browser) => op(browser),
                None => debug!(browser_id = %self.id, "host call for closed browser, dropping"),
            }
        }
    }
}

impl BrowserHost for SimBrowserHost {
    fn was_hidden(&self, hidden: bool) {
        self.with_browser(|b| b.set_hidden(hidden));
    }

    fn set_focus(&self, focus: bool) {
        self.with_browser(|b| b.focused = focus);
    }

    fn invalidate(&self) {
        self.with_browser(|b| b.invalidate());
    }

    fn send_mouse_event(&self, _event: MouseEvent) {
        self.with_browser(|b| b.mouse_events += 1);
    }

    fn send_key_event(&self, _event: KeyEvent) {
        self.with_browser(|b| b.key_events += 1);
    }
}

// =============================================================================
// TESTS
// =============================================================================
