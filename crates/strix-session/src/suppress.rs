//! Scoped suppression of toolkit notifications.
//!
//! Removing a container page synchronously emits an "active page
//! changed" notification in most toolkits. During a structural mutation
//! that happens under the registry lock, acting on that notification
//! would re-enter the lock. The mutation instead holds a
//! [`SuppressGuard`] for its duration; host bindings check
//! [`is_suppressed`](SignalSuppression::is_suppressed) before emitting.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared suppression flag between the shell and its host binding.
/// Reentrant: nested guards stack.
#[derive(Clone, Default)]
pub struct SignalSuppression {
    depth: Arc<AtomicUsize>,
}

impl SignalSuppression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses signals until the returned guard drops. Released on
    /// every exit path, including unwinding.
    pub fn enter(&self) -> SuppressGuard {
        self.depth.fetch_add(1, Ordering::SeqCst);
        SuppressGuard {
            depth: self.depth.clone(),
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.depth.load(Ordering::SeqCst) > 0
    }
}

pub struct SuppressGuard {
    depth: Arc<AtomicUsize>,
}

impl Drop for SuppressGuard {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::SeqCst);
    }
}
