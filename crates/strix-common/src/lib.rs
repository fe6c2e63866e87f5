pub mod errors;
pub mod events;
pub mod geometry;
pub mod id;

pub use errors::{ConfigError, ShellError, StrixError, WaitError};
pub use events::{EventBus, ShellEvent};
pub use geometry::{LogicalSize, PhysicalSize};
pub use id::{new_request_id, BrowserId, RequestId, TabId, WidgetId};

pub type Result<T> = std::result::Result<T, StrixError>;
