use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of one open tab.
///
/// Assigned by the shell from a monotonic counter and never reused while the
/// process lives. Deferred closures capture this id and re-resolve through
/// the registry at execution time; they never capture indices or widget
/// handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

/// Identifier the engine assigns to a browser instance at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrowserId(pub u32);

impl fmt::Display for BrowserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "browser-{}", self.0)
    }
}

/// Handle to a container page in the GUI toolkit's element tree.
///
/// Owned by the toolkit binding; a Tab only ever holds it as a back-reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetId(pub u64);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget-{}", self.0)
    }
}

pub fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Correlation id for one in-flight script-evaluation request.
///
/// Used to match the engine's asynchronous script-result callback to the
/// waiting caller, and to cancel the request if the owning session closes
/// mid-wait.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    pub fn new() -> Self {
        Self(new_request_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_id_is_valid_uuid() {
        let id = new_request_id();
        let parsed = uuid::Uuid::parse_str(&id);
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap().get_version_num(), 4);
    }

    #[test]
    fn new_request_id_is_unique() {
        let a = new_request_id();
        let b = new_request_id();
        assert_ne!(a, b);
    }

    #[test]
    fn request_id_display() {
        let rid = RequestId::new();
        let display = rid.to_string();
        assert_eq!(display, rid.as_str());
    }

    #[test]
    fn request_id_default() {
        let rid = RequestId::default();
        assert!(!rid.as_str().is_empty());
    }

    #[test]
    fn request_id_equality() {
        let rid = RequestId::new();
        let cloned = rid.clone();
        assert_eq!(rid, cloned);

        let other = RequestId::new();
        assert_ne!(rid, other);
    }

    #[test]
    fn request_id_serialization() {
        let rid = RequestId::new();
        let json = serde_json::to_string(&rid).unwrap();
        let deserialized: RequestId = serde_json::from_str(&json).unwrap();
        assert_eq!(rid, deserialized);
    }

    #[test]
    fn request_id_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        let r1 = RequestId::new();
        let r2 = r1.clone();
        set.insert(r1);
        set.insert(r2);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn tab_id_display() {
        assert_eq!(TabId(7).to_string(), "tab-7");
        assert_eq!(BrowserId(3).to_string(), "browser-3");
        assert_eq!(WidgetId(12).to_string(), "widget-12");
    }

    #[test]
    fn tab_id_is_copy_and_hashable() {
        use std::collections::HashSet;
        let id = TabId(1);
        let copy = id;
        let mut set = HashSet::new();
        set.insert(id);
        set.insert(copy);
        assert_eq!(set.len(), 1);
    }
}
