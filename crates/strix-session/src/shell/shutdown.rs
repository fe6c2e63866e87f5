//! Session teardown.

use strix_common::events::ShellEvent;

use super::TabShell;

impl TabShell {
    /// Shuts the session down. Safe to call more than once; repeat
    /// calls return immediately.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        tracing::info!(tabs = self.registry.len(), "shutting down session");

        // 1. Cancel in-flight script requests so their waiters observe
        //    cancellation rather than a timeout.
        for request in self.pending_scripts.keys() {
            self.engine.cancel_script(request);
        }
        self.pending_scripts.clear();

        // 2. Close every tab through the full teardown path, front to
        //    back.
        while !self.registry.is_empty() {
            self.close_tab(0);
        }

        // 3. Stop the engine.
        self.engine.shutdown();

        // 4. Drop the session token. Tasks still queued against this
        //    session fail their liveness check and evaporate.
        self.drop_session_token();

        self.shut_down = true;
        self.publish(ShellEvent::Shutdown);
        tracing::info!("session shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================
