//! Container binding for a real window.

use std::sync::Arc;

use winit::window::Window;

use strix_common::id::{TabId, WidgetId};
use strix_session::{HeadlessHost, HostEvent, SignalSuppression, SurfaceHost};

/// `SurfaceHost` bound to a winit window.
///
/// Page bookkeeping delegates to [`HeadlessHost`]; window side effects
/// (repaint scheduling) land on the winit handle. Clones share the
/// same container state, so the app can keep a handle for focus
/// updates after the boxed copy moves into the shell.
#[derive(Clone)]
pub(super) struct WinitHost {
    container: HeadlessHost,
    window: Arc<Window>,
}

impl WinitHost {
    pub(super) fn new(suppression: SignalSuppression, window: Arc<Window>) -> Self {
        Self {
            container: HeadlessHost::new(suppression),
            window,
        }
    }

    pub(super) fn set_focused(&self, focused: bool) {
        self.container.set_focused(focused);
    }
}

impl SurfaceHost for WinitHost {
    fn insert_page(&mut self, tab_id: TabId, index: usize) -> WidgetId {
        self.container.insert_page(tab_id, index)
    }

    fn remove_page(&mut self, widget: WidgetId) {
        self.container.remove_page(widget);
    }

    fn set_current_page(&mut self, index: usize) {
        self.container.set_current_page(index);
    }

    fn set_page_index(&mut self, widget: WidgetId, index: usize) {
        self.container.set_page_index(widget, index);
    }

    fn request_repaint(&mut self) {
        self.window.request_redraw();
    }

    fn close_window(&mut self) {
        self.container.close_window();
    }

    fn focus_state(&self) -> bool {
        self.container.focus_state()
    }

    fn drain_events(&mut self) -> Vec<HostEvent> {
        self.container.drain_events()
    }
}
