use strix_common::geometry::LogicalSize;
use strix_common::id::RequestId;

use crate::api::BrowserSpec;
use crate::hooks::{EngineHooks, LoadingState};
use crate::paint::{Paint, PaintKind};

use std::sync::Arc;

use super::{HANG_URL, SCRIPT_HANG};

/// One callback emission produced by a pump step. Collected under the
/// engine lock, fired after it is released.
pub(super) enum Delivery {
    Address(String),
    Loading(LoadingState),
    Title(String),
    PaintInvalidated,
    Paint(Paint),
    ScriptResult(RequestId, serde_json::Value),
}

struct PendingScript {
    request: RequestId,
    code: String,
}

/// Simulated per-browser state. Commands only mutate state; every
/// callback is delivered from [`step`](SimBrowser::step), which runs on
/// the pumping thread.
pub(super) struct SimBrowser {
    pub(super) url: String,
    pub(super) title: String,
    history: Vec<String>,
    history_index: usize,
    pub(super) loading: bool,
    /// Pumps left until the load finishes. `None` while loading means
    /// the load never finishes (hang marker URL).
    remaining_load_pumps: Option<u32>,
    announce_address: bool,
    announce_load_begin: bool,
    announce_load_end: bool,
    pub(super) logical_size: LogicalSize,
    pub(super) scale_factor: f64,
    background_rgb: [u8; 3],
    pub(super) hidden: bool,
    pub(super) focused: bool,
    needs_paint: bool,
    scripts: Vec<PendingScript>,
    pub(super) mouse_events: u64,
    pub(super) key_events: u64,
    pub(super) hooks: Arc<EngineHooks>,
    load_pumps: u32,
}

impl SimBrowser {
    pub(super) fn new(spec: &BrowserSpec, hooks: Arc<EngineHooks>, load_pumps: u32) -> Self {
        let mut browser = Self {
            url: String::new(),
            title: String::new(),
            history: Vec::new(),
            history_index: 0,
            loading: false,
            remaining_load_pumps: None,
            announce_address: false,
            announce_load_begin: false,
            announce_load_end: false,
            logical_size: spec.logical_size,
            scale_factor: spec.scale_factor,
            background_rgb: spec.background_rgb,
            hidden: false,
            focused: false,
            needs_paint: false,
            scripts: Vec::new(),
            mouse_events: 0,
            key_events: 0,
            hooks,
            load_pumps,
        };
        browser.begin_navigation(&spec.url, true);
        browser
    }

    pub(super) fn begin_navigation(&mut self, url: &str, push_history: bool) {
        if push_history {
            self.history.truncate(self.history_index + 1);
            self.history.push(url.to_string());
            self.history_index = self.history.len() - 1;
        }
        self.url = url.to_string();
        self.loading = true;
        self.remaining_load_pumps = if url.starts_with(HANG_URL) {
            None
        } else {
            Some(self.load_pumps)
        };
        self.announce_address = true;
        self.announce_load_begin = true;
    }

    pub(super) fn go_back(&mut self) {
        if self.history_index > 0 {
            self.history_index -= 1;
            let url = self.history[self.history_index].clone();
            self.begin_navigation(&url, false);
        }
    }

    pub(super) fn go_forward(&mut self) {
        if self.history_index + 1 < self.history.len() {
            self.history_index += 1;
            let url = self.history[self.history_index].clone();
            self.begin_navigation(&url, false);
        }
    }

    pub(super) fn reload(&mut self) {
        let url = self.url.clone();
        self.begin_navigation(&url, false);
    }

    pub(super) fn stop_load(&mut self) {
        if self.loading {
            self.loading = false;
            self.remaining_load_pumps = None;
            self.announce_load_end = true;
        }
    }

    pub(super) fn resize(&mut self, size: LogicalSize, scale_factor: f64) {
        if size.is_degenerate() {
            return;
        }
        self.logical_size = size;
        self.scale_factor = scale_factor;
        self.needs_paint = true;
    }

    pub(super) fn invalidate(&mut self) {
        self.needs_paint = true;
    }

    pub(super) fn set_hidden(&mut self, hidden: bool) {
        if self.hidden && !hidden {
            self.needs_paint = true;
        }
        self.hidden = hidden;
    }

    pub(super) fn submit_script(&mut self, request: RequestId, code: &str) {
        self.scripts.push(PendingScript {
            request,
            code: code.to_string(),
        });
    }

    pub(super) fn cancel_script(&mut self, request: &RequestId) {
        self.scripts.retain(|s| s.request != *request);
    }

    pub(super) fn pending_script_count(&self) -> usize {
        self.scripts.len()
    }

    pub(super) fn loading_state(&self) -> LoadingState {
        LoadingState {
            is_loading: self.loading,
            can_go_back: self.history_index > 0,
            can_go_forward: self.history_index + 1 < self.history.len(),
        }
    }

    /// Advances the browser one pump cycle and returns the callback
    /// emissions it produced.
    pub(super) fn step(&mut self) -> Vec<Delivery> {
        let mut out = Vec::new();

        if self.announce_address {
            self.announce_address = false;
            out.push(Delivery::Address(self.url.clone()));
        }
        if self.announce_load_begin {
            self.announce_load_begin = false;
            out.push(Delivery::Loading(self.loading_state()));
        }
        if self.announce_load_end {
            self.announce_load_end = false;
            out.push(Delivery::Loading(self.loading_state()));
        }

        if self.loading {
            match self.remaining_load_pumps {
                Some(n) if n <= 1 => {
                    self.loading = false;
                    self.remaining_load_pumps = None;
                    self.title = self.url.clone();
                    out.push(Delivery::Title(self.title.clone()));
                    out.push(Delivery::Loading(self.loading_state()));
                    self.needs_paint = true;
                }
                Some(n) => self.remaining_load_pumps = Some(n - 1),
                None => {}
            }
        }

        let mut parked = Vec::new();
        for script in self.scripts.drain(..) {
            if script.code.starts_with(SCRIPT_HANG) {
                parked.push(script);
            } else {
                // Evaluation rule: code that parses as JSON echoes back
                // as its value; anything else yields null.
                let value =
                    serde_json::from_str(&script.code).unwrap_or(serde_json::Value::Null);
                out.push(Delivery::ScriptResult(script.request, value));
            }
        }
        self.scripts = parked;

        if self.needs_paint && !self.hidden {
            let size = self.logical_size.to_physical(self.scale_factor);
            if size.width > 0 && size.height > 0 {
                self.needs_paint = false;
                out.push(Delivery::PaintInvalidated);
                out.push(Delivery::Paint(Paint::solid(
                    PaintKind::View,
                    size,
                    self.scale_factor,
                    self.background_rgb,
                )));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browser(url: &str, load_pumps: u32) -> SimBrowser {
        let spec = BrowserSpec {
            url: url.to_string(),
            logical_size: LogicalSize::new(100, 100),
            scale_factor: 1.0,
            frame_rate: 30,
            background_rgb: [0, 0, 0],
        };
        SimBrowser::new(&spec, Arc::new(EngineHooks::new()), load_pumps)
    }

    fn finish_load(b: &mut SimBrowser) {
        for _ in 0..10 {
            b.step();
            if !b.loading {
                return;
            }
        }
        panic!("load did not finish");
    }

    #[test]
    fn navigation_after_back_discards_forward_history() {
        let mut b = browser("sim://a", 0);
        finish_load(&mut b);
        b.begin_navigation("sim://b", true);
        finish_load(&mut b);
        b.go_back();
        finish_load(&mut b);
        assert_eq!(b.url, "sim://a");
        assert!(b.loading_state().can_go_forward);

        b.begin_navigation("sim://c", true);
        finish_load(&mut b);
        assert_eq!(b.history, vec!["sim://a", "sim://c"]);
        assert!(b.loading_state().can_go_back);
        assert!(!b.loading_state().can_go_forward);
    }

    #[test]
    fn back_at_history_start_is_a_no_op() {
        let mut b = browser("sim://a", 0);
        finish_load(&mut b);
        b.go_back();
        assert_eq!(b.url, "sim://a");
        assert!(!b.loading);
    }

    #[test]
    fn stop_load_keeps_title_empty() {
        let mut b = browser("sim://slow", 5);
        b.step();
        assert!(b.loading);
        b.stop_load();
        let deliveries = b.step();
        assert!(!b.loading);
        assert!(b.title.is_empty());
        assert!(deliveries
            .iter()
            .any(|d| matches!(d, Delivery::Loading(s) if !s.is_loading)));
    }

    #[test]
    fn unhiding_requests_a_fresh_paint() {
        let mut b = browser("sim://a", 0);
        finish_load(&mut b);
        b.step();
        b.set_hidden(true);
        b.invalidate();
        assert!(b.step().is_empty());
        b.set_hidden(false);
        let deliveries = b.step();
        assert!(deliveries
            .iter()
            .any(|d| matches!(d, Delivery::Paint(_))));
    }
}
