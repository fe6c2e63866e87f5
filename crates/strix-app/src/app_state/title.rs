//! Window title management: reflects the active tab.

use super::core::StrixApp;

impl StrixApp {
    /// Update the window title from the active tab.
    ///
    /// Format: "{page title} - {app title}", falling back to the app
    /// title alone before the first title callback lands.
    pub(super) fn update_window_title(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        if !self.config.window.dynamic_title {
            return;
        }

        let app_title = &self.config.window.title;
        let title = match self.shell.as_ref().and_then(|s| s.active_tab()) {
            Some(tab) if !tab.title.is_empty() => format!("{} - {}", tab.title, app_title),
            _ => app_title.clone(),
        };

        if title != self.last_title {
            window.set_title(&title);
            self.last_title = title;
        }
    }
}
