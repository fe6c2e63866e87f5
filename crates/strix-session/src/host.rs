//! GUI toolkit binding for the tab container.
//!
//! Each front-end implements [`SurfaceHost`] over its own widget tree.
//! Notifications flow the other way through a drained event queue
//! rather than synchronous callbacks, and honor the shared
//! [`SignalSuppression`] flag: a host emits nothing while a structural
//! mutation holds the suppression guard.

use std::mem;
use std::sync::{Arc, Mutex};

use strix_common::id::{TabId, WidgetId};
use tracing::debug;

use crate::suppress::SignalSuppression;

/// Notification emitted by a host binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The container's current page changed (user click, or a side
    /// effect of inserting/removing pages).
    PageChanged(usize),
    /// The user asked to close the window.
    CloseRequested,
}

/// The visual tab container and window, as the shell sees them.
pub trait SurfaceHost {
    /// Inserts a container page for a tab and returns its widget
    /// handle. May synchronously emit [`HostEvent::PageChanged`] when
    /// the insertion changes the current page, so callers must have
    /// the registry entry in place first.
    fn insert_page(&mut self, tab_id: TabId, index: usize) -> WidgetId;

    fn remove_page(&mut self, widget: WidgetId);

    fn set_current_page(&mut self, index: usize);

    /// Updates the index a page widget believes it lives at, after
    /// removals shift positions.
    fn set_page_index(&mut self, widget: WidgetId, index: usize);

    fn request_repaint(&mut self);

    fn close_window(&mut self);

    /// Whether the window currently has input focus.
    fn focus_state(&self) -> bool;

    fn drain_events(&mut self) -> Vec<HostEvent>;
}

struct PageSlot {
    widget: WidgetId,
    tab: TabId,
    recorded_index: usize,
}

struct HostState {
    pages: Vec<PageSlot>,
    current: Option<usize>,
    next_widget: u64,
    events: Vec<HostEvent>,
    window_closed: bool,
    focused: bool,
    repaint_requests: u64,
}

/// Windowless host used by the headless front-end and tests. Mimics a
/// notebook container's signal behavior, including the synchronous
/// current-page notifications real toolkits emit during insertion and
/// removal.
///
/// Cloning yields a second handle to the same container, so a harness
/// can keep observing (and clicking) after the shell takes ownership of
/// the original.
#[derive(Clone)]
pub struct HeadlessHost {
    suppression: SignalSuppression,
    inner: Arc<Mutex<HostState>>,
}

impl HeadlessHost {
    pub fn new(suppression: SignalSuppression) -> Self {
        Self {
            suppression,
            inner: Arc::new(Mutex::new(HostState {
                pages: Vec::new(),
                current: None,
                next_widget: 1,
                events: Vec::new(),
                window_closed: false,
                focused: true,
                repaint_requests: 0,
            })),
        }
    }

    pub fn page_count(&self) -> usize {
        self.inner.lock().unwrap().pages.len()
    }

    pub fn current_page(&self) -> Option<usize> {
        self.inner.lock().unwrap().current
    }

    pub fn page_tabs(&self) -> Vec<TabId> {
        self.inner.lock().unwrap().pages.iter().map(|p| p.tab).collect()
    }

    pub fn recorded_index_of(&self, widget: WidgetId) -> Option<usize> {
        self.inner
            .lock()
            .unwrap()
            .pages
            .iter()
            .find(|p| p.widget == widget)
            .map(|p| p.recorded_index)
    }

    pub fn window_closed(&self) -> bool {
        self.inner.lock().unwrap().window_closed
    }

    pub fn repaint_requests(&self) -> u64 {
        self.inner.lock().unwrap().repaint_requests
    }

    pub fn set_focused(&self, focused: bool) {
        self.inner.lock().unwrap().focused = focused;
    }

    /// Simulates the user clicking a tab in the container.
    pub fn click_page(&mut self, index: usize) {
        self.set_current_page(index);
    }

    /// Simulates the user hitting the window's close button. Not a
    /// container signal, so suppression does not apply.
    pub fn user_close(&self) {
        self.inner
            .lock()
            .unwrap()
            .events
            .push(HostEvent::CloseRequested);
    }

    fn emit(&self, state: &mut HostState, event: HostEvent) {
        if self.suppression.is_suppressed() {
            debug!(?event, "host signal suppressed");
            return;
        }
        state.events.push(event);
    }
}

impl SurfaceHost for HeadlessHost {
    fn insert_page(&mut self, tab_id: TabId, index: usize) -> WidgetId {
        let mut state = self.inner.lock().unwrap();
        let widget = WidgetId(state.next_widget);
        state.next_widget += 1;
        let index = index.min(state.pages.len());
        state.pages.insert(
            index,
            PageSlot {
                widget,
                tab: tab_id,
                recorded_index: index,
            },
        );
        // A notebook makes its first page current and announces it
        // right away, from inside the insert call.
        if state.current.is_none() {
            state.current = Some(index);
            self.emit(&mut state, HostEvent::PageChanged(index));
        }
        widget
    }

    fn remove_page(&mut self, widget: WidgetId) {
        let mut state = self.inner.lock().unwrap();
        let Some(position) = state.pages.iter().position(|p| p.widget == widget) else {
            debug!(%widget, "remove for unknown page widget");
            return;
        };
        state.pages.remove(position);
        match state.current {
            Some(current) if current == position => {
                if state.pages.is_empty() {
                    state.current = None;
                } else {
                    let next = current.min(state.pages.len() - 1);
                    state.current = Some(next);
                    self.emit(&mut state, HostEvent::PageChanged(next));
                }
            }
            Some(current) if current > position => {
                state.current = Some(current - 1);
            }
            _ => {}
        }
    }

    fn set_current_page(&mut self, index: usize) {
        let mut state = self.inner.lock().unwrap();
        if index >= state.pages.len() {
            return;
        }
        if state.current != Some(index) {
            state.current = Some(index);
            self.emit(&mut state, HostEvent::PageChanged(index));
        }
    }

    fn set_page_index(&mut self, widget: WidgetId, index: usize) {
        let mut state = self.inner.lock().unwrap();
        if let Some(slot) = state.pages.iter_mut().find(|p| p.widget == widget) {
            slot.recorded_index = index;
        }
    }

    fn request_repaint(&mut self) {
        self.inner.lock().unwrap().repaint_requests += 1;
    }

    fn close_window(&mut self) {
        self.inner.lock().unwrap().window_closed = true;
    }

    fn focus_state(&self) -> bool {
        self.inner.lock().unwrap().focused
    }

    fn drain_events(&mut self) -> Vec<HostEvent> {
        mem::take(&mut self.inner.lock().unwrap().events)
    }
}
