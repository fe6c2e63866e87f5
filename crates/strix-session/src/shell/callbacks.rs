//! Engine callback application.
//!
//! These run on the UI thread when the dispatcher queue drains. The tab
//! they target may have closed between scheduling and execution; that
//! resolves here as a logged drop, never an error.

use strix_common::events::ShellEvent;
use strix_common::id::{RequestId, TabId};
use strix_engine::hooks::LoadingState;
use strix_engine::paint::Paint;

use crate::resize::PaintDecision;

use super::TabShell;

impl TabShell {
    pub(crate) fn apply_address_changed(&mut self, tab_id: TabId, url: String) {
        match self.registry.with_tab_mut(tab_id, |t| t.url = url.clone()) {
            Some(()) => tracing::debug!(tab_id = %tab_id, url = %url, "address changed"),
            None => tracing::debug!(tab_id = %tab_id, "address change for closed tab, dropping"),
        }
    }

    pub(crate) fn apply_loading_state(&mut self, tab_id: TabId, state: LoadingState) {
        let applied = self.registry.with_tab_mut(tab_id, |t| {
            t.loading = state.is_loading;
            t.can_go_back = state.can_go_back;
            t.can_go_forward = state.can_go_forward;
        });
        match applied {
            Some(()) => tracing::debug!(
                tab_id = %tab_id,
                loading = state.is_loading,
                "loading state changed"
            ),
            None => tracing::debug!(tab_id = %tab_id, "loading state for closed tab, dropping"),
        }
    }

    pub(crate) fn apply_title_changed(&mut self, tab_id: TabId, title: String) {
        match self
            .registry
            .with_tab_mut(tab_id, |t| t.title = title.clone())
        {
            Some(()) => {
                tracing::debug!(tab_id = %tab_id, title = %title, "title changed");
                self.publish(ShellEvent::TitleChanged { tab_id, title });
            }
            None => tracing::debug!(tab_id = %tab_id, "title change for closed tab, dropping"),
        }
    }

    pub(crate) fn apply_paint_invalidated(&mut self, tab_id: TabId) {
        if self.registry.find_by_id(tab_id).is_none() {
            tracing::debug!(tab_id = %tab_id, "invalidation for closed tab, dropping");
            return;
        }
        if self.registry.active_id() == Some(tab_id) {
            self.host.request_repaint();
        }
    }

    /// Runs a delivered frame through the tab's resize controller and
    /// applies the verdict to its surface.
    pub(crate) fn apply_paint(&mut self, tab_id: TabId, paint: Paint) {
        let decision = self
            .registry
            .with_tab_mut(tab_id, |t| t.resize.on_paint(paint.kind, paint.size, paint.scale_factor));
        let Some(decision) = decision else {
            tracing::debug!(tab_id = %tab_id, "paint for closed tab, dropping");
            return;
        };
        let is_active = self.registry.active_id() == Some(tab_id);
        let Some(surface) = self.surfaces.get_mut(&tab_id) else {
            return;
        };

        match decision {
            PaintDecision::Present | PaintDecision::Bypass => {
                surface.upload_frame(paint.size, &paint.pixels);
                surface.set_view_size(paint.size);
                if is_active {
                    self.host.request_repaint();
                }
            }
            PaintDecision::Discard => {
                tracing::debug!(
                    tab_id = %tab_id,
                    width = paint.size.width,
                    height = paint.size.height,
                    "stale-size frame discarded"
                );
                surface.clear_to_neutral();
                if is_active {
                    self.host.request_repaint();
                }
            }
        }
    }

    pub(crate) fn apply_script_result(&mut self, request: RequestId, value: serde_json::Value) {
        match self.pending_scripts.get_mut(&request) {
            Some(slot) => {
                tracing::debug!(request = %request, "script result arrived");
                *slot = Some(value);
            }
            None => {
                tracing::debug!(request = %request, "result for unknown or cancelled request");
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
