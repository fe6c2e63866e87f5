//! Cross-thread dispatch onto the UI thread.
//!
//! Engine callbacks arrive on engine worker threads. Anything that
//! touches tabs, surfaces, or the toolkit is wrapped as a [`UiTask`]
//! and scheduled here; the UI thread drains the queue between events.
//! Every task is paired with a [`SessionHandle`] and the liveness check
//! happens at execution time on the UI thread, not at schedule time,
//! because the session can die while a task sits in the queue. A task
//! whose session is gone is dropped silently; that is the documented
//! contract, not a failure.

use std::collections::VecDeque;
use std::mem;
use std::sync::{Arc, Mutex, Weak};

use tracing::debug;

use crate::shell::TabShell;

/// Liveness anchor for one window/session. The shell holds the only
/// strong reference; dropping it at teardown turns every queued task
/// into a no-op.
pub struct SessionToken(());

impl SessionToken {
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> Arc<SessionToken> {
        Arc::new(SessionToken(()))
    }
}

/// Weak reference a scheduled task carries to its owning session.
#[derive(Clone)]
pub struct SessionHandle(Weak<SessionToken>);

impl SessionHandle {
    pub fn of(token: &Arc<SessionToken>) -> Self {
        Self(Arc::downgrade(token))
    }

    /// Handle that was never alive. Tasks scheduled against it are
    /// always dropped.
    pub fn dead() -> Self {
        Self(Weak::new())
    }

    pub fn is_live(&self) -> bool {
        self.0.strong_count() > 0
    }
}

/// Closure executed on the UI thread with exclusive shell access.
pub type UiTask = Box<dyn FnOnce(&mut TabShell) + Send>;

/// Scheduling side of the dispatcher, implemented per front-end.
pub trait Dispatcher: Send + Sync {
    /// Queues `task` to run on the UI thread exactly once, provided
    /// `target` is still alive when its turn comes.
    fn schedule(&self, target: SessionHandle, task: UiTask);
}

/// FIFO queue dispatcher. Front-ends drain it from their event loop
/// tick; tasks scheduled mid-drain wait for the next drain.
#[derive(Default)]
pub struct QueueDispatcher {
    queue: Mutex<VecDeque<(SessionHandle, UiTask)>>,
}

impl QueueDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().map(|q| q.len()).unwrap_or(0)
    }

    /// Runs queued tasks in FIFO order on the caller's thread. Returns
    /// how many executed; tasks whose session died are dropped with a
    /// debug log.
    pub fn drain(&self, shell: &mut TabShell) -> usize {
        let batch = {
            match self.queue.lock() {
                Ok(mut queue) => mem::take(&mut *queue),
                Err(_) => return 0,
            }
        };
        let mut executed = 0;
        for (handle, task) in batch {
            if handle.is_live() {
                task(shell);
                executed += 1;
            } else {
                debug!("dropping queued task for dead session");
            }
        }
        executed
    }
}

impl Dispatcher for QueueDispatcher {
    fn schedule(&self, target: SessionHandle, task: UiTask) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back((target, task));
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
