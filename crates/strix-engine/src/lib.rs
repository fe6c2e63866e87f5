//! Browser engine boundary.
//!
//! The embedded engine is an external collaborator: it owns browser
//! instances and their worker threads, and reports navigation state and
//! frames through per-browser callback hooks. This crate defines that
//! boundary (the [`BrowserEngine`] and [`BrowserHost`] traits plus the
//! hook and paint types crossing it) and ships [`SimEngine`], a
//! deterministic in-process implementation that drives the headless
//! front-end and tests.
//!
//! Threading contract: hooks may fire from any engine thread. Callers
//! must not touch UI state inside a hook; they capture a tab id and
//! hop to the UI thread through the dispatcher.

pub mod api;
pub mod hooks;
pub mod input;
pub mod paint;
pub mod sim;

pub use api::{BrowserEngine, BrowserHost, BrowserSpec, EngineError};
pub use hooks::{EngineHooks, LoadingState};
pub use paint::{Paint, PaintKind};
pub use sim::SimEngine;
