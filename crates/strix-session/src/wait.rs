//! Bounded synchronous waits driven from the UI thread.
//!
//! Each poll iteration runs one full shell tick, so engine callbacks
//! and host events keep flowing while the caller blocks. Success is
//! checked before the deadline: a wait that completes exactly at its
//! timeout still reports success.

use std::thread;
use std::time::{Duration, Instant};

use strix_common::errors::WaitError;
use strix_common::id::{RequestId, TabId};

use crate::shell::TabShell;

pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

impl TabShell {
    /// Blocks until `tab_id` finishes loading, the timeout passes, the
    /// tab disappears, or the session shuts down.
    pub fn wait_for_load(&mut self, tab_id: TabId, timeout: Duration) -> Result<(), WaitError> {
        let started = Instant::now();
        loop {
            if self.is_shut_down() {
                return Err(WaitError::Cancelled);
            }
            match self.registry.with_tab(tab_id, |t| t.loading) {
                None => return Err(WaitError::Gone),
                Some(false) => return Ok(()),
                Some(true) => {}
            }
            let elapsed = started.elapsed();
            if elapsed >= timeout {
                tracing::warn!(tab_id = %tab_id, ?elapsed, "load wait timed out");
                return Err(WaitError::TimedOut { elapsed });
            }
            self.tick();
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Evaluates `code` in the tab's browser and blocks for the result.
    ///
    /// On timeout or tab closure the request is cancelled engine-side,
    /// so a result that arrives late finds nothing to fill.
    pub fn evaluate_script(
        &mut self,
        tab_id: TabId,
        code: &str,
        timeout: Duration,
    ) -> Result<serde_json::Value, WaitError> {
        let browser_id = self
            .registry
            .with_tab(tab_id, |t| t.browser.as_ref().map(|b| b.browser_id))
            .flatten()
            .ok_or(WaitError::Gone)?;

        let request = RequestId::new();
        self.pending_scripts.insert(request.clone(), None);
        self.engine.evaluate_script(browser_id, request.clone(), code);
        tracing::debug!(request = %request, tab_id = %tab_id, "script submitted");

        let started = Instant::now();
        loop {
            if self.is_shut_down() {
                return Err(WaitError::Cancelled);
            }
            match self.pending_scripts.remove(&request) {
                // Shutdown or another cancellation path already took
                // the slot.
                None => return Err(WaitError::Cancelled),
                Some(Some(value)) => return Ok(value),
                Some(None) => {
                    self.pending_scripts.insert(request.clone(), None);
                }
            }
            if self.registry.find_by_id(tab_id).is_none() {
                self.engine.cancel_script(&request);
                self.pending_scripts.remove(&request);
                return Err(WaitError::Gone);
            }
            let elapsed = started.elapsed();
            if elapsed >= timeout {
                self.engine.cancel_script(&request);
                self.pending_scripts.remove(&request);
                tracing::warn!(request = %request, ?elapsed, "script wait timed out");
                return Err(WaitError::TimedOut { elapsed });
            }
            self.tick();
            thread::sleep(POLL_INTERVAL);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
