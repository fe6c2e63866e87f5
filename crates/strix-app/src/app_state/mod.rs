//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window, the tab session, and input translation.

mod core;
mod event_handler;
mod host;
mod init;
mod polling;
mod title;

pub use core::StrixApp;
