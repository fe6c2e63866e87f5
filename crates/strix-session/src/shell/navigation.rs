//! Commands targeting the active tab's browser.
//!
//! Each command resolves the engine browser id under the registry lock
//! and issues the engine call outside it. A tab that has no browser yet
//! (or anymore) turns the command into a logged no-op.

use strix_common::id::BrowserId;
use strix_engine::input::{KeyEvent, MouseEvent};

use super::TabShell;

impl TabShell {
    fn active_browser(&self) -> Option<BrowserId> {
        self.registry
            .with_active_mut(|t| t.browser.as_ref().map(|b| b.browser_id))
            .flatten()
    }

    fn browser_at(&self, index: usize) -> Option<BrowserId> {
        let id = self.registry.id_at(index)?;
        self.registry
            .with_tab(id, |t| t.browser.as_ref().map(|b| b.browser_id))
            .flatten()
    }

    pub fn navigate(&mut self, url: &str) {
        match self.active_browser() {
            Some(browser_id) => {
                tracing::info!(browser_id = %browser_id, url, "navigating");
                self.engine.navigate(browser_id, url);
            }
            None => tracing::debug!(url, "navigate with no engine-backed active tab"),
        }
    }

    pub fn navigate_at(&mut self, index: usize, url: &str) {
        match self.browser_at(index) {
            Some(browser_id) => {
                tracing::info!(browser_id = %browser_id, index, url, "navigating");
                self.engine.navigate(browser_id, url);
            }
            None => tracing::debug!(index, url, "navigate with no engine-backed tab"),
        }
    }

    pub fn go_back(&mut self) {
        match self.active_browser() {
            Some(browser_id) => self.engine.go_back(browser_id),
            None => tracing::debug!("go back with no engine-backed active tab"),
        }
    }

    pub fn go_forward(&mut self) {
        match self.active_browser() {
            Some(browser_id) => self.engine.go_forward(browser_id),
            None => tracing::debug!("go forward with no engine-backed active tab"),
        }
    }

    pub fn reload(&mut self) {
        match self.active_browser() {
            Some(browser_id) => self.engine.reload(browser_id),
            None => tracing::debug!("reload with no engine-backed active tab"),
        }
    }

    pub fn stop_loading(&mut self) {
        match self.active_browser() {
            Some(browser_id) => self.engine.stop_load(browser_id),
            None => tracing::debug!("stop with no engine-backed active tab"),
        }
    }

    // -------------------------------------------------------------------------
    // Input forwarding
    // -------------------------------------------------------------------------

    pub fn forward_mouse_event(&mut self, event: MouseEvent) {
        let attachment = self
            .registry
            .with_active_mut(|t| t.browser.clone())
            .flatten();
        if let Some(attachment) = attachment {
            attachment.host.send_mouse_event(event);
        }
    }

    pub fn forward_key_event(&mut self, event: KeyEvent) {
        let attachment = self
            .registry
            .with_active_mut(|t| t.browser.clone())
            .flatten();
        if let Some(attachment) = attachment {
            attachment.host.send_key_event(event);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
