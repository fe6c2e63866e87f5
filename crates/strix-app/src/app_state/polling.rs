//! Session polling and wake-up scheduling.

use std::time::Instant;

use winit::event_loop::ActiveEventLoop;

use strix_session::POLL_INTERVAL;

use super::core::StrixApp;

impl StrixApp {
    /// Tick the session and schedule the next wake-up.
    ///
    /// Paint delivery schedules redraws itself through the host, so
    /// the loop always parks until the next poll instant.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            if let Some(shell) = &mut self.shell {
                shell.tick();
            }
            self.update_window_title();
        }

        event_loop.set_control_flow(winit::event_loop::ControlFlow::WaitUntil(
            Instant::now() + POLL_INTERVAL,
        ));
    }
}
