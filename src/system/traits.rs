use anyhow::Result;

use crate::dispatch::DisplayRequest;

/// Trait for the host notification capability - abstracts the desktop
/// notification surface for testability.
pub trait NotificationDisplay {
    /// Submit one alert for display. Fire-and-forget: callers do not retry
    /// on failure and never await user acknowledgement.
    fn show(&self, request: &DisplayRequest) -> Result<()>;
}

/// Handle to one foreground client window of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHandle {
    pub id: String,
    pub focusable: bool,
}

/// Trait for foreground client operations - enumeration, focus, window
/// opening, and alert teardown.
pub trait ClientSurface {
    /// Close a displayed alert by its tag.
    fn close_notification(&self, tag: &str) -> Result<()>;

    /// Enumerate existing foreground clients of the application.
    fn list_clients(&self) -> Result<Vec<ClientHandle>>;

    /// Bring an existing client to the foreground.
    fn focus(&self, client: &ClientHandle) -> Result<()>;

    /// Open a new client window at the given URL.
    fn open_window(&self, url: &str) -> Result<()>;
}

/// Trait for host process lifecycle operations.
pub trait HostControl {
    /// Promote this process to active immediately instead of waiting for a
    /// previous instance to finish.
    fn promote_active(&self) -> Result<()>;
}
