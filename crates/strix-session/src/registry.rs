//! The tab registry: single source of truth for open tabs.
//!
//! One mutex guards the ordered tab list and the active index. The
//! lock is held only for the duration of a mutation; callers extract
//! what they need into local copies and call into the toolkit or the
//! engine only after release. The one sanctioned exception is the
//! suppressed container-page removal inside
//! [`remove_with`](TabRegistry::remove_with).

use std::sync::{Arc, Mutex};

use strix_common::id::{BrowserId, TabId, WidgetId};
use strix_engine::api::BrowserHost;

use crate::resize::ResizeSync;

/// Engine-side attachment of a tab, populated once the two-phase
/// creation completes. The browser's lifetime stays with the engine;
/// the host object is only a messenger to it.
#[derive(Clone)]
pub struct BrowserAttachment {
    pub browser_id: BrowserId,
    pub host: Arc<dyn BrowserHost>,
}

/// One open browsing session.
pub struct TabRecord {
    pub id: TabId,
    pub browser: Option<BrowserAttachment>,
    pub url: String,
    pub title: String,
    pub loading: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    /// Back-reference to the container page; owned by the toolkit.
    pub widget: Option<WidgetId>,
    pub resize: ResizeSync,
}

impl TabRecord {
    pub fn new(id: TabId, url: &str, resize_tolerance: i32) -> Self {
        Self {
            id,
            browser: None,
            url: url.to_string(),
            title: String::new(),
            loading: true,
            can_go_back: false,
            can_go_forward: false,
            widget: None,
            resize: ResizeSync::new(resize_tolerance),
        }
    }
}

/// Copy of one tab's display state, safe to hold without the lock.
#[derive(Debug, Clone)]
pub struct TabSummary {
    pub id: TabId,
    pub url: String,
    pub title: String,
    pub loading: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub has_browser: bool,
}

/// Back-reference update for a tab whose index shifted after a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReindexEntry {
    pub widget: WidgetId,
    pub index: usize,
}

/// What a completed removal yields, captured under the lock.
pub struct CloseOutcome {
    pub record: TabRecord,
    pub remaining: usize,
    pub was_active: bool,
}

struct RegistryState {
    tabs: Vec<TabRecord>,
    active_index: Option<usize>,
}

/// Ordered tab collection plus "which tab is active."
///
/// Invariants: `active_index` is `Some` and in bounds whenever the
/// registry is non-empty; every tab id is unique.
pub struct TabRegistry {
    inner: Mutex<RegistryState>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryState {
                tabs: Vec::new(),
                active_index: None,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a tab and returns its index. The first tab inserted
    /// becomes active so the active-index invariant holds from the
    /// moment the registry is non-empty.
    pub fn insert(&self, record: TabRecord) -> usize {
        let mut state = self.inner.lock().unwrap();
        state.tabs.push(record);
        let index = state.tabs.len() - 1;
        if state.active_index.is_none() {
            state.active_index = Some(index);
        }
        index
    }

    pub fn find_by_id(&self, id: TabId) -> Option<usize> {
        let state = self.inner.lock().unwrap();
        state.tabs.iter().position(|t| t.id == id)
    }

    pub fn id_at(&self, index: usize) -> Option<TabId> {
        let state = self.inner.lock().unwrap();
        state.tabs.get(index).map(|t| t.id)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.inner.lock().unwrap().active_index
    }

    pub fn active_id(&self) -> Option<TabId> {
        let state = self.inner.lock().unwrap();
        let index = state.active_index?;
        state.tabs.get(index).map(|t| t.id)
    }

    pub fn set_active(&self, index: usize) -> bool {
        let mut state = self.inner.lock().unwrap();
        if index < state.tabs.len() {
            state.active_index = Some(index);
            true
        } else {
            false
        }
    }

    /// Runs `f` on a tab under the lock. `f` must only read or mutate
    /// the record and return extracted copies; it must not call into
    /// the toolkit or the engine.
    pub fn with_tab_mut<R>(&self, id: TabId, f: impl FnOnce(&mut TabRecord) -> R) -> Option<R> {
        let mut state = self.inner.lock().unwrap();
        state.tabs.iter_mut().find(|t| t.id == id).map(f)
    }

    pub fn with_tab<R>(&self, id: TabId, f: impl FnOnce(&TabRecord) -> R) -> Option<R> {
        let state = self.inner.lock().unwrap();
        state.tabs.iter().find(|t| t.id == id).map(f)
    }

    pub fn with_active_mut<R>(&self, f: impl FnOnce(&mut TabRecord) -> R) -> Option<R> {
        let mut state = self.inner.lock().unwrap();
        let index = state.active_index?;
        state.tabs.get_mut(index).map(f)
    }

    pub fn attach_browser(&self, id: TabId, attachment: BrowserAttachment) -> bool {
        self.with_tab_mut(id, |t| t.browser = Some(attachment))
            .is_some()
    }

    pub fn set_widget(&self, id: TabId, widget: WidgetId) -> bool {
        self.with_tab_mut(id, |t| t.widget = Some(widget)).is_some()
    }

    pub fn summaries(&self) -> Vec<TabSummary> {
        let state = self.inner.lock().unwrap();
        state
            .tabs
            .iter()
            .map(|t| TabSummary {
                id: t.id,
                url: t.url.clone(),
                title: t.title.clone(),
                loading: t.loading,
                can_go_back: t.can_go_back,
                can_go_forward: t.can_go_forward,
                has_browser: t.browser.is_some(),
            })
            .collect()
    }

    /// Removes the tab at `index`.
    ///
    /// `during` runs while the lock is still held, with the record
    /// about to be removed and the back-reference updates for every
    /// tab after it. This is where the caller removes the container
    /// page with signals suppressed; it must not touch the registry.
    ///
    /// The active index is re-derived here: closing the active tab
    /// selects `min(previous_active, remaining - 1)`, closing a tab
    /// before the active one shifts it down so the same tab stays
    /// active.
    pub fn remove_with(
        &self,
        index: usize,
        during: impl FnOnce(&TabRecord, &[ReindexEntry]),
    ) -> Option<CloseOutcome> {
        let mut state = self.inner.lock().unwrap();
        if index >= state.tabs.len() {
            return None;
        }
        let previous_active = state.active_index;
        let was_active = previous_active == Some(index);

        let plan: Vec<ReindexEntry> = state.tabs[index + 1..]
            .iter()
            .enumerate()
            .filter_map(|(offset, tab)| {
                tab.widget.map(|widget| ReindexEntry {
                    widget,
                    index: index + offset,
                })
            })
            .collect();
        during(&state.tabs[index], &plan);

        let record = state.tabs.remove(index);
        let remaining = state.tabs.len();
        state.active_index = if remaining == 0 {
            None
        } else {
            match previous_active {
                Some(active) if active == index => Some(active.min(remaining - 1)),
                Some(active) if active > index => Some(active - 1),
                other => other,
            }
        };

        Some(CloseOutcome {
            record,
            remaining,
            was_active,
        })
    }
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
