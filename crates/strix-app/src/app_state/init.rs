//! Window creation and session bring-up.

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use strix_engine::SimEngine;
use strix_session::{QueueDispatcher, SignalSuppression, TabShell};

use crate::settings::session_settings;

use super::core::{logical_view, StrixApp};
use super::host::WinitHost;

impl StrixApp {
    /// Create the window and bring the tab session up inside it.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width as f64,
                self.config.window.height as f64,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let settings = session_settings(&self.config);
        let engine = SimEngine::new(self.config.engine.sim_load_pumps);
        let dispatcher = Arc::new(QueueDispatcher::default());
        let suppression = SignalSuppression::new();
        let host = WinitHost::new(suppression.clone(), window.clone());
        let mut shell = TabShell::new(
            settings,
            Arc::new(engine),
            Box::new(host.clone()),
            dispatcher,
            suppression,
        );

        let scale_factor = window.scale_factor();
        shell.handle_view_resize(logical_view(window.inner_size(), scale_factor), scale_factor);

        let urls: Vec<String> = if self.startup_urls.is_empty() {
            vec![shell.settings().homepage.clone()]
        } else {
            self.startup_urls.clone()
        };
        for url in &urls {
            let index = shell.create_tab(url);
            if index < 0 {
                continue;
            }
            if let Some(tab_id) = shell.tab_id_at(index as usize) {
                shell.surface_ready(tab_id);
            }
        }

        self.window = Some(window);
        self.host = Some(host);
        self.shell = Some(shell);
        tracing::info!("Window created and session initialized ({} tabs)", urls.len());
        true
    }
}
