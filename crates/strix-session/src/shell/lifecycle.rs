//! Tab creation, closing, and activation.

use strix_common::errors::ShellError;
use strix_common::events::ShellEvent;
use strix_common::geometry::LogicalSize;
use strix_common::id::TabId;
use strix_engine::api::BrowserSpec;

use crate::adapter::hooks_for_tab;
use crate::registry::{BrowserAttachment, TabRecord};

use super::TabShell;

impl TabShell {
    /// Opens a tab showing `url` and activates it.
    ///
    /// Returns the new tab's index, or `-1` when creation fails; the
    /// cause is logged. The engine-side browser is not created here:
    /// it follows once the tab's surface reports ready.
    pub fn create_tab(&mut self, url: &str) -> i32 {
        match self.try_create_tab(url) {
            Ok(index) => index as i32,
            Err(e) => {
                tracing::error!(url, error = %e, "tab creation failed");
                -1
            }
        }
    }

    fn try_create_tab(&mut self, url: &str) -> Result<usize, ShellError> {
        if self.shut_down {
            return Err(ShellError::EngineUnavailable);
        }
        if self.registry.len() >= self.settings.max_tabs {
            return Err(ShellError::TabLimit(self.settings.max_tabs));
        }

        let tab_id = TabId(self.next_tab_id);
        self.next_tab_id += 1;

        let mut surface = self.make_surface();
        surface
            .initialize()
            .map_err(|e| ShellError::SurfaceInit(e.to_string()))?;

        // Registry before container: inserting a page can synchronously
        // announce a current-page change, and that notification must
        // already find the tab.
        let record = TabRecord::new(tab_id, url, self.settings.resize_tolerance_px);
        let index = self.registry.insert(record);
        self.surfaces.insert(tab_id, surface);

        let widget = self.host.insert_page(tab_id, index);
        self.registry.set_widget(tab_id, widget);

        tracing::info!(tab_id = %tab_id, url, index, "tab created");
        self.publish(ShellEvent::TabOpened(tab_id));
        self.switch_tab(index);
        Ok(index)
    }

    /// Second phase of tab creation, called once the tab's surface has
    /// a usable rendering context. Creates the engine-side browser and
    /// attaches it.
    pub fn surface_ready(&mut self, tab_id: TabId) {
        let ready = self
            .surfaces
            .get(&tab_id)
            .map(|s| s.is_ready())
            .unwrap_or(false);
        match self.registry.with_tab(tab_id, |t| t.browser.is_some()) {
            None => {
                tracing::debug!(tab_id = %tab_id, "surface ready for closed tab, dropping");
            }
            Some(true) => {}
            Some(false) if !ready => {
                tracing::warn!(tab_id = %tab_id, "surface reported ready but is not usable");
            }
            Some(false) => self.create_browser_for_tab(tab_id),
        }
    }

    fn create_browser_for_tab(&mut self, tab_id: TabId) {
        let Some(url) = self.registry.with_tab(tab_id, |t| t.url.clone()) else {
            return;
        };
        let view = self.effective_view();
        let spec = BrowserSpec {
            url,
            logical_size: view,
            scale_factor: self.scale_factor,
            frame_rate: self.settings.frame_rate,
            background_rgb: self.settings.background_rgb,
        };
        let hooks = hooks_for_tab(tab_id, self.dispatcher.clone(), self.session_handle());

        match self.engine.create_browser(spec, hooks) {
            Ok((browser_id, host)) => {
                self.registry.attach_browser(
                    tab_id,
                    BrowserAttachment {
                        browser_id,
                        host: host.clone(),
                    },
                );
                tracing::info!(tab_id = %tab_id, browser_id = %browser_id, "browser attached");
                if self.registry.active_id() == Some(tab_id) {
                    host.was_hidden(false);
                    host.set_focus(self.host.focus_state());
                } else {
                    host.was_hidden(true);
                }
                // Arm the tab's controller with the size the browser was
                // created at so its first paint is size-checked too.
                self.registry.with_tab_mut(tab_id, |t| {
                    let _ = t.resize.on_widget_resize(view);
                });
            }
            Err(e) => {
                tracing::error!(tab_id = %tab_id, error = %e, "engine rejected browser, closing tab");
                if let Some(index) = self.registry.find_by_id(tab_id) {
                    self.close_tab(index);
                }
            }
        }
    }

    /// Closes the tab at `index`. Returns false when the index is
    /// already gone.
    pub fn close_tab(&mut self, index: usize) -> bool {
        let outcome = {
            let suppression = self.suppression.clone();
            let host = &mut self.host;
            self.registry.remove_with(index, |record, plan| {
                // Structural mutation: the container must not announce
                // page changes while the registry and it disagree.
                let _guard = suppression.enter();
                if let Some(widget) = record.widget {
                    host.remove_page(widget);
                }
                for entry in plan {
                    host.set_page_index(entry.widget, entry.index);
                }
            })
        };
        let Some(outcome) = outcome else {
            tracing::debug!(index, "close of invalid index ignored");
            return false;
        };
        let record = outcome.record;

        // Teardown order: hide the browser so the engine stops painting,
        // release the surface while its buffers are still valid, then
        // let the engine dispose of the browser.
        if let Some(attachment) = &record.browser {
            attachment.host.was_hidden(true);
        }
        if let Some(mut surface) = self.surfaces.remove(&record.id) {
            surface.cleanup();
        }
        if let Some(attachment) = &record.browser {
            self.engine.close_browser(attachment.browser_id, false);
        }

        tracing::info!(tab_id = %record.id, remaining = outcome.remaining, "tab closed");
        self.publish(ShellEvent::TabClosed(record.id));

        if outcome.remaining == 0 {
            tracing::info!("last tab closed, closing window");
            self.window_close_requested = true;
            self.host.close_window();
        } else if outcome.was_active {
            if let Some(next) = self.registry.active_index() {
                self.switch_tab(next);
            }
        }
        true
    }

    pub fn close_tab_by_id(&mut self, tab_id: TabId) -> bool {
        match self.registry.find_by_id(tab_id) {
            Some(index) => self.close_tab(index),
            None => {
                tracing::debug!(tab_id = %tab_id, "close of unknown tab ignored");
                false
            }
        }
    }

    /// Activates the tab at `index`: hides the outgoing browser, shows
    /// and focuses the incoming one, and aligns the container.
    pub fn switch_tab(&mut self, index: usize) -> bool {
        if index >= self.registry.len() {
            tracing::debug!(index, "switch to invalid index ignored");
            return false;
        }
        let previous = self.registry.active_index();
        let previous_attachment = match previous {
            Some(p) if p != index => self
                .registry
                .id_at(p)
                .and_then(|id| self.registry.with_tab(id, |t| t.browser.clone()))
                .flatten(),
            _ => None,
        };
        let Some(new_id) = self.registry.id_at(index) else {
            return false;
        };
        let new_attachment = self
            .registry
            .with_tab(new_id, |t| t.browser.clone())
            .flatten();
        self.registry.set_active(index);

        if let Some(attachment) = &previous_attachment {
            attachment.host.was_hidden(true);
        }
        if let Some(attachment) = &new_attachment {
            attachment.host.was_hidden(false);
            attachment.host.set_focus(self.host.focus_state());
            attachment.host.invalidate();
        }
        self.host.set_current_page(index);
        self.host.request_repaint();
        // The freshly shown widget gets the window's current size, the
        // same way a toolkit resizes a page on reveal.
        self.sync_active_view();

        tracing::debug!(tab_id = %new_id, index, "tab activated");
        self.publish(ShellEvent::TabActivated(new_id));
        true
    }

    fn effective_view(&self) -> LogicalSize {
        if self.view_size.is_degenerate() {
            self.settings.initial_view
        } else {
            self.view_size
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::shell::SessionSettings;
    use crate::testutil::{open_tab, sim_shell, sim_shell_with_settings, FailingSurface};
    use strix_common::geometry::LogicalSize;
    use strix_engine::sim::REJECT_URL;

    // -- creation --

    #[test]
    fn tabs_are_created_in_two_phases() {
        let (mut shell, _dispatcher, engine) = sim_shell();

        let index = shell.create_tab("sim://a");
        assert_eq!(index, 0);
        let tabs = shell.tabs();
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].url, "sim://a");
        assert!(!tabs[0].has_browser);
        assert_eq!(engine.browser_count(), 0);

        let tab_id = shell.tab_id_at(0).unwrap();
        shell.surface_ready(tab_id);
        assert!(shell.tabs()[0].has_browser);
        assert_eq!(engine.browser_count(), 1);

        let browser_id = shell.browser_id_of(tab_id).unwrap();
        let info = engine.browser_info(browser_id).unwrap();
        assert_eq!(info.url, "sim://a");
        assert!(!info.hidden);
    }

    #[test]
    fn each_new_tab_becomes_active() {
        let (mut shell, _dispatcher, _engine) = sim_shell();
        shell.create_tab("sim://a");
        assert_eq!(shell.active_index(), Some(0));
        shell.create_tab("sim://b");
        assert_eq!(shell.active_index(), Some(1));
        assert_eq!(shell.tab_count(), 2);
    }

    #[test]
    fn repeated_surface_ready_attaches_one_browser() {
        let (mut shell, _dispatcher, engine) = sim_shell();
        let tab_id = open_tab(&mut shell, "sim://a");
        shell.surface_ready(tab_id);
        shell.surface_ready(tab_id);
        assert_eq!(engine.browser_count(), 1);
    }

    #[test]
    fn surface_ready_for_closed_tab_is_dropped() {
        let (mut shell, _dispatcher, engine) = sim_shell();
        let index = shell.create_tab("sim://a");
        let tab_id = shell.tab_id_at(index as usize).unwrap();
        shell.close_tab(index as usize);

        shell.surface_ready(tab_id);
        assert_eq!(engine.browser_count(), 0);
    }

    #[test]
    fn browser_creation_uses_the_current_view_size() {
        let (mut shell, _dispatcher, engine) = sim_shell();
        shell.handle_view_resize(LogicalSize::new(640, 400), 2.0);
        let tab_id = open_tab(&mut shell, "sim://a");

        let info = engine.browser_info(shell.browser_id_of(tab_id).unwrap()).unwrap();
        assert_eq!(info.logical_size, LogicalSize::new(640, 400));
        assert_eq!(info.scale_factor, 2.0);
    }

    // -- creation failures --

    #[test]
    fn engine_rejection_removes_the_placeholder_tab() {
        let (mut shell, _dispatcher, engine) = sim_shell();
        let index = shell.create_tab(REJECT_URL);
        assert_eq!(index, 0);
        let tab_id = shell.tab_id_at(0).unwrap();

        shell.surface_ready(tab_id);
        assert_eq!(shell.tab_count(), 0);
        assert_eq!(engine.browser_count(), 0);
        // It was the only tab, so the window goes down with it.
        assert!(shell.window_close_requested());
    }

    #[test]
    fn surface_init_failure_reports_the_sentinel() {
        let (shell, _dispatcher, _engine) = sim_shell();
        let mut shell = shell.with_surface_factory(|| Box::new(FailingSurface));
        assert_eq!(shell.create_tab("sim://a"), -1);
        assert_eq!(shell.tab_count(), 0);
    }

    #[test]
    fn tab_limit_is_enforced() {
        let settings = SessionSettings {
            max_tabs: 2,
            ..SessionSettings::default()
        };
        let (mut shell, _dispatcher, _engine) = sim_shell_with_settings(settings);
        assert_eq!(shell.create_tab("sim://a"), 0);
        assert_eq!(shell.create_tab("sim://b"), 1);
        assert_eq!(shell.create_tab("sim://c"), -1);
        assert_eq!(shell.tab_count(), 2);
    }

    #[test]
    fn create_after_shutdown_reports_the_sentinel() {
        let (mut shell, _dispatcher, _engine) = sim_shell();
        shell.shutdown();
        assert_eq!(shell.create_tab("sim://a"), -1);
    }

    // -- closing --

    #[test]
    fn closing_the_middle_tab_keeps_the_successor_active() {
        let (mut shell, _dispatcher, _engine) = sim_shell();
        let _a = open_tab(&mut shell, "sim://a");
        let _b = open_tab(&mut shell, "sim://b");
        let c = open_tab(&mut shell, "sim://c");
        shell.switch_tab(1);
        assert_eq!(shell.active_index(), Some(1));

        assert!(shell.close_tab(1));

        let tabs = shell.tabs();
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0].url, "sim://a");
        assert_eq!(tabs[1].url, "sim://c");
        // Index 1 now names the old third tab, and it is the active one.
        assert_eq!(shell.active_index(), Some(1));
        assert_eq!(shell.tab_id_at(1), Some(c));
    }

    #[test]
    fn closing_the_last_active_tab_steps_back() {
        let (mut shell, _dispatcher, _engine) = sim_shell();
        let a = open_tab(&mut shell, "sim://a");
        let _b = open_tab(&mut shell, "sim://b");
        assert_eq!(shell.active_index(), Some(1));

        shell.close_tab(1);
        assert_eq!(shell.active_index(), Some(0));
        assert_eq!(shell.tab_id_at(0), Some(a));
    }

    #[test]
    fn closing_before_the_active_tab_keeps_it_active() {
        let (mut shell, _dispatcher, _engine) = sim_shell();
        let _a = open_tab(&mut shell, "sim://a");
        let _b = open_tab(&mut shell, "sim://b");
        let c = open_tab(&mut shell, "sim://c");
        assert_eq!(shell.active_index(), Some(2));

        shell.close_tab(0);
        assert_eq!(shell.active_index(), Some(1));
        assert_eq!(shell.tab_id_at(1), Some(c));
    }

    #[test]
    fn closing_a_tab_disposes_its_browser_and_surface() {
        let (mut shell, _dispatcher, engine) = sim_shell();
        let a = open_tab(&mut shell, "sim://a");
        let _b = open_tab(&mut shell, "sim://b");
        let browser = shell.browser_id_of(a).unwrap();

        shell.close_tab(0);
        assert!(engine.browser_info(browser).is_none());
        assert!(shell.screenshot_tab(a).is_err());
        assert_eq!(engine.browser_count(), 1);
    }

    #[test]
    fn closing_the_only_tab_requests_window_close() {
        let (mut shell, _dispatcher, _engine) = sim_shell();
        open_tab(&mut shell, "sim://a");
        shell.close_tab(0);
        assert_eq!(shell.tab_count(), 0);
        assert!(shell.window_close_requested());
    }

    #[test]
    fn closing_an_invalid_index_is_a_no_op() {
        let (mut shell, _dispatcher, _engine) = sim_shell();
        open_tab(&mut shell, "sim://a");
        assert!(!shell.close_tab(7));
        assert_eq!(shell.tab_count(), 1);
        assert!(!shell.window_close_requested());
    }

    #[test]
    fn close_by_id_survives_index_shifts() {
        let (mut shell, _dispatcher, _engine) = sim_shell();
        let _a = open_tab(&mut shell, "sim://a");
        let b = open_tab(&mut shell, "sim://b");
        let _c = open_tab(&mut shell, "sim://c");

        shell.close_tab(0);
        assert!(shell.close_tab_by_id(b));
        assert_eq!(shell.tabs().len(), 1);
        assert_eq!(shell.tabs()[0].url, "sim://c");
        assert!(!shell.close_tab_by_id(b));
    }

    // -- switching --

    #[test]
    fn switching_hides_the_outgoing_browser_and_shows_the_incoming() {
        let (mut shell, _dispatcher, engine) = sim_shell();
        let a = open_tab(&mut shell, "sim://a");
        let b = open_tab(&mut shell, "sim://b");

        let a_browser = shell.browser_id_of(a).unwrap();
        let b_browser = shell.browser_id_of(b).unwrap();
        assert!(engine.browser_info(a_browser).unwrap().hidden);
        assert!(!engine.browser_info(b_browser).unwrap().hidden);

        shell.switch_tab(0);
        assert!(!engine.browser_info(a_browser).unwrap().hidden);
        assert!(engine.browser_info(b_browser).unwrap().hidden);
        assert!(engine.browser_info(a_browser).unwrap().focused);
    }

    #[test]
    fn switching_to_an_invalid_index_changes_nothing() {
        let (mut shell, _dispatcher, _engine) = sim_shell();
        open_tab(&mut shell, "sim://a");
        assert!(!shell.switch_tab(3));
        assert_eq!(shell.active_index(), Some(0));
    }

    #[test]
    fn switching_refeeds_the_view_size_to_the_revealed_tab() {
        let (mut shell, _dispatcher, engine) = sim_shell();
        let a = open_tab(&mut shell, "sim://a");
        let _b = open_tab(&mut shell, "sim://b");

        // The window resized while tab b was in front.
        shell.handle_view_resize(LogicalSize::new(500, 300), 1.0);
        shell.switch_tab(0);

        let info = engine.browser_info(shell.browser_id_of(a).unwrap()).unwrap();
        assert_eq!(info.logical_size, LogicalSize::new(500, 300));
    }
}
