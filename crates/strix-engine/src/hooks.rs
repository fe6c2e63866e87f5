//! Per-browser callback registration.
//!
//! Hooks are registered once at browser creation and fire from engine
//! threads. A hook closure must capture only thread-safe, id-based
//! state; resolving ids back to live tabs happens on the UI thread.

use strix_common::id::RequestId;

use crate::paint::Paint;

/// Navigation state reported by the engine alongside load transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingState {
    pub is_loading: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

type AddressFn = Box<dyn Fn(String) + Send + Sync>;
type LoadingFn = Box<dyn Fn(LoadingState) + Send + Sync>;
type TitleFn = Box<dyn Fn(String) + Send + Sync>;
type InvalidatedFn = Box<dyn Fn() + Send + Sync>;
type PaintFn = Box<dyn Fn(Paint) + Send + Sync>;
type ScriptResultFn = Box<dyn Fn(RequestId, serde_json::Value) + Send + Sync>;

/// The set of callbacks one browser reports through. Unset hooks are
/// simply not called.
#[derive(Default)]
pub struct EngineHooks {
    on_address_changed: Option<AddressFn>,
    on_loading_state_changed: Option<LoadingFn>,
    on_title_changed: Option<TitleFn>,
    on_paint_invalidated: Option<InvalidatedFn>,
    on_paint: Option<PaintFn>,
    on_script_result: Option<ScriptResultFn>,
}

impl EngineHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_address_changed(mut self, f: impl Fn(String) + Send + Sync + 'static) -> Self {
        self.on_address_changed = Some(Box::new(f));
        self
    }

    pub fn on_loading_state_changed(
        mut self,
        f: impl Fn(LoadingState) + Send + Sync + 'static,
    ) -> Self {
        self.on_loading_state_changed = Some(Box::new(f));
        self
    }

    pub fn on_title_changed(mut self, f: impl Fn(String) + Send + Sync + 'static) -> Self {
        self.on_title_changed = Some(Box::new(f));
        self
    }

    pub fn on_paint_invalidated(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_paint_invalidated = Some(Box::new(f));
        self
    }

    pub fn on_paint(mut self, f: impl Fn(Paint) + Send + Sync + 'static) -> Self {
        self.on_paint = Some(Box::new(f));
        self
    }

    pub fn on_script_result(
        mut self,
        f: impl Fn(RequestId, serde_json::Value) + Send + Sync + 'static,
    ) -> Self {
        self.on_script_result = Some(Box::new(f));
        self
    }

    // -- Emission, used by engine implementations --

    pub fn emit_address_changed(&self, url: &str) {
        if let Some(f) = &self.on_address_changed {
            f(url.to_string());
        }
    }

    pub fn emit_loading_state_changed(&self, state: LoadingState) {
        if let Some(f) = &self.on_loading_state_changed {
            f(state);
        }
    }

    pub fn emit_title_changed(&self, title: &str) {
        if let Some(f) = &self.on_title_changed {
            f(title.to_string());
        }
    }

    pub fn emit_paint_invalidated(&self) {
        if let Some(f) = &self.on_paint_invalidated {
            f();
        }
    }

    pub fn emit_paint(&self, paint: Paint) {
        if let Some(f) = &self.on_paint {
            f(paint);
        }
    }

    pub fn emit_script_result(&self, request: RequestId, value: serde_json::Value) {
        if let Some(f) = &self.on_script_result {
            f(request, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn unset_hooks_are_silent() {
        let hooks = EngineHooks::new();
        hooks.emit_address_changed("about:blank");
        hooks.emit_paint_invalidated();
        hooks.emit_script_result(RequestId::new(), serde_json::Value::Null);
    }

    #[test]
    fn set_hooks_receive_emissions() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let hooks = EngineHooks::new()
            .on_address_changed(move |url| {
                assert_eq!(url, "sim://a");
                c.fetch_add(1, Ordering::SeqCst);
            })
            .on_loading_state_changed({
                let c = count.clone();
                move |state| {
                    assert!(state.is_loading);
                    c.fetch_add(1, Ordering::SeqCst);
                }
            });

        hooks.emit_address_changed("sim://a");
        hooks.emit_loading_state_changed(LoadingState {
            is_loading: true,
            can_go_back: false,
            can_go_forward: false,
        });
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn hooks_are_send_and_sync() {
        fn assert_bounds<T: Send + Sync>() {}
        assert_bounds::<EngineHooks>();
    }
}
