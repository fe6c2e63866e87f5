use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::TabId;

/// Shell lifecycle notifications for front-end and status consumers.
///
/// Best-effort: publishing with no subscribers is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ShellEvent {
    TabOpened(TabId),
    TabClosed(TabId),
    TabActivated(TabId),
    TitleChanged { tab_id: TabId, title: String },
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<ShellEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShellEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: ShellEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}
