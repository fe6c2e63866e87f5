//! Tab-session coordination.
//!
//! This crate owns everything between the browser engine and a window:
//! the tab registry, per-tab resize/paint gating, the cross-thread
//! dispatch queue that serializes engine callbacks onto the UI thread,
//! and the [`TabShell`] that ties them into tab operations.
//!
//! Threading model: a [`TabShell`] lives on one thread. Engine threads
//! never touch it; their callbacks capture a [`TabId`] plus a session
//! handle and go through the [`Dispatcher`], which the shell drains in
//! [`TabShell::tick`]. A task whose tab or session is gone by drain
//! time degrades to a logged no-op.
//!
//! [`TabId`]: strix_common::id::TabId

pub mod adapter;
pub mod dispatch;
pub mod host;
pub mod registry;
pub mod resize;
pub mod shell;
pub mod suppress;
pub mod wait;

#[cfg(test)]
pub(crate) mod testutil;

pub use adapter::hooks_for_tab;
pub use dispatch::{Dispatcher, QueueDispatcher, SessionHandle, SessionToken, UiTask};
pub use host::{HeadlessHost, HostEvent, SurfaceHost};
pub use registry::{BrowserAttachment, TabRecord, TabRegistry, TabSummary};
pub use resize::{PaintDecision, ResizeDirective, ResizePhase, ResizeSync};
pub use shell::{SessionSettings, TabShell};
pub use suppress::{SignalSuppression, SuppressGuard};
pub use wait::POLL_INTERVAL;
