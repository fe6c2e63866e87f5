//! Shared fixtures: a shell wired to the simulated engine and a
//! headless host.

use std::sync::Arc;

use strix_common::geometry::PhysicalSize;
use strix_common::id::TabId;
use strix_engine::sim::SimEngine;
use strix_surface::{RenderSurface, SurfaceError};

use crate::dispatch::QueueDispatcher;
use crate::host::HeadlessHost;
use crate::shell::{SessionSettings, TabShell};
use crate::suppress::SignalSuppression;

pub(crate) fn sim_shell() -> (TabShell, Arc<QueueDispatcher>, SimEngine) {
    let (shell, dispatcher, engine, _host) = sim_shell_full(SessionSettings::default(), 0);
    (shell, dispatcher, engine)
}

/// Like [`sim_shell`], with loads taking `pumps` engine pumps to
/// finish.
pub(crate) fn sim_shell_with_pumps(pumps: u32) -> (TabShell, Arc<QueueDispatcher>, SimEngine) {
    let (shell, dispatcher, engine, _host) = sim_shell_full(SessionSettings::default(), pumps);
    (shell, dispatcher, engine)
}

pub(crate) fn sim_shell_with_settings(
    settings: SessionSettings,
) -> (TabShell, Arc<QueueDispatcher>, SimEngine) {
    let (shell, dispatcher, engine, _host) = sim_shell_full(settings, 0);
    (shell, dispatcher, engine)
}

/// Full harness, including a second handle to the host for observing
/// container state and injecting user actions.
pub(crate) fn sim_shell_full(
    settings: SessionSettings,
    pumps: u32,
) -> (TabShell, Arc<QueueDispatcher>, SimEngine, HeadlessHost) {
    let engine = SimEngine::new(pumps);
    let dispatcher = Arc::new(QueueDispatcher::default());
    let suppression = SignalSuppression::new();
    let host = HeadlessHost::new(suppression.clone());
    let shell = TabShell::new(
        settings,
        Arc::new(engine.clone()),
        Box::new(host.clone()),
        dispatcher.clone(),
        suppression,
    );
    (shell, dispatcher, engine, host)
}

/// Creates a tab and runs creation's second phase, leaving it
/// engine-backed.
pub(crate) fn open_tab(shell: &mut TabShell, url: &str) -> TabId {
    let index = shell.create_tab(url);
    assert!(index >= 0, "tab creation failed for {url}");
    let tab_id = shell.tab_id_at(index as usize).expect("created tab has an id");
    shell.surface_ready(tab_id);
    tab_id
}

/// Surface whose initialization always fails.
pub(crate) struct FailingSurface;

impl RenderSurface for FailingSurface {
    fn initialize(&mut self) -> Result<(), SurfaceError> {
        Err(SurfaceError::Init("no backend available".to_string()))
    }

    fn is_ready(&self) -> bool {
        false
    }

    fn set_view_size(&mut self, _size: PhysicalSize) {}

    fn upload_frame(&mut self, _size: PhysicalSize, _pixels: &[u8]) {}

    fn clear_to_neutral(&mut self) {}

    fn render(&mut self) -> Result<(), SurfaceError> {
        Err(SurfaceError::NotInitialized)
    }

    fn cleanup(&mut self) {}

    fn take_screenshot(&self) -> Result<Vec<u8>, SurfaceError> {
        Err(SurfaceError::NoFrame)
    }
}
