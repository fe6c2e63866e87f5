//! Engine-to-shell callback adapter.
//!
//! Builds the hook set registered with the engine for one tab. Every
//! closure captures the tab's stable id, never a widget handle and
//! never the tab's current index, both of which can be stale by the
//! time a callback fires. The closure's only job is to hop to the UI
//! thread; re-resolving the id through the registry happens there, and
//! an id that no longer resolves makes the task a silent no-op.

use std::sync::Arc;

use strix_common::id::TabId;
use strix_engine::EngineHooks;

use crate::dispatch::{Dispatcher, SessionHandle};

/// Hook set for a tab about to get its engine browser.
pub fn hooks_for_tab(
    tab_id: TabId,
    dispatcher: Arc<dyn Dispatcher>,
    session: SessionHandle,
) -> EngineHooks {
    EngineHooks::new()
        .on_address_changed({
            let dispatcher = dispatcher.clone();
            let session = session.clone();
            move |url| {
                dispatcher.schedule(
                    session.clone(),
                    Box::new(move |shell| shell.apply_address_changed(tab_id, url)),
                );
            }
        })
        .on_loading_state_changed({
            let dispatcher = dispatcher.clone();
            let session = session.clone();
            move |state| {
                dispatcher.schedule(
                    session.clone(),
                    Box::new(move |shell| shell.apply_loading_state(tab_id, state)),
                );
            }
        })
        .on_title_changed({
            let dispatcher = dispatcher.clone();
            let session = session.clone();
            move |title| {
                dispatcher.schedule(
                    session.clone(),
                    Box::new(move |shell| shell.apply_title_changed(tab_id, title)),
                );
            }
        })
        .on_paint_invalidated({
            let dispatcher = dispatcher.clone();
            let session = session.clone();
            move || {
                dispatcher.schedule(
                    session.clone(),
                    Box::new(move |shell| shell.apply_paint_invalidated(tab_id)),
                );
            }
        })
        .on_paint({
            let dispatcher = dispatcher.clone();
            let session = session.clone();
            move |paint| {
                dispatcher.schedule(
                    session.clone(),
                    Box::new(move |shell| shell.apply_paint(tab_id, paint)),
                );
            }
        })
        .on_script_result({
            let dispatcher = dispatcher.clone();
            let session = session.clone();
            move |request, value| {
                dispatcher.schedule(
                    session.clone(),
                    Box::new(move |shell| shell.apply_script_result(request, value)),
                );
            }
        })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{QueueDispatcher, SessionToken};
    use crate::testutil::sim_shell;
    use strix_engine::LoadingState;

    #[test]
    fn hooks_defer_registry_updates_until_drain() {
        let (mut shell, dispatcher, _engine) = sim_shell();
        let index = shell.create_tab("sim://a");
        assert!(index >= 0);
        let tab_id = shell.tab_id_at(index as usize).unwrap();

        let hooks = hooks_for_tab(
            tab_id,
            dispatcher.clone() as Arc<dyn Dispatcher>,
            shell.session_handle(),
        );
        hooks.emit_title_changed("Example Domain");

        // Nothing applied yet: the update sits in the queue.
        assert_eq!(shell.tabs()[index as usize].title, "");
        assert_eq!(dispatcher.pending(), 1);

        dispatcher.drain(&mut shell);
        assert_eq!(shell.tabs()[index as usize].title, "Example Domain");
    }

    #[test]
    fn loading_state_updates_navigation_flags() {
        let (mut shell, dispatcher, _engine) = sim_shell();
        let index = shell.create_tab("sim://a");
        let tab_id = shell.tab_id_at(index as usize).unwrap();

        let hooks = hooks_for_tab(
            tab_id,
            dispatcher.clone() as Arc<dyn Dispatcher>,
            shell.session_handle(),
        );
        hooks.emit_loading_state_changed(LoadingState {
            is_loading: false,
            can_go_back: true,
            can_go_forward: false,
        });
        dispatcher.drain(&mut shell);

        let tab = &shell.tabs()[index as usize];
        assert!(!tab.loading);
        assert!(tab.can_go_back);
        assert!(!tab.can_go_forward);
    }

    #[test]
    fn callback_for_a_closed_tab_is_a_silent_no_op() {
        let (mut shell, dispatcher, _engine) = sim_shell();
        let index = shell.create_tab("sim://a");
        let tab_id = shell.tab_id_at(index as usize).unwrap();

        let hooks = hooks_for_tab(
            tab_id,
            dispatcher.clone() as Arc<dyn Dispatcher>,
            shell.session_handle(),
        );
        // Scheduled before the close, executed after.
        hooks.emit_title_changed("late");
        shell.close_tab(index as usize);

        dispatcher.drain(&mut shell);
        assert!(shell.tabs().is_empty());
    }

    #[test]
    fn callback_for_a_dead_session_is_dropped_unexecuted() {
        let (mut shell, _dispatcher, _engine) = sim_shell();
        let dispatcher = Arc::new(QueueDispatcher::new());
        let token = SessionToken::new();

        let hooks = hooks_for_tab(
            TabId(1),
            dispatcher.clone() as Arc<dyn Dispatcher>,
            crate::dispatch::SessionHandle::of(&token),
        );
        hooks.emit_title_changed("never applied");
        drop(token);

        assert_eq!(dispatcher.drain(&mut shell), 0);
    }
}
