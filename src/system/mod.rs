pub mod native;
pub mod traits;

#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// Re-export commonly used types
pub use native::{DesktopClientSurface, DesktopHostControl, DesktopNotificationDisplay};
pub use traits::{ClientHandle, ClientSurface, HostControl, NotificationDisplay};

#[cfg(any(test, feature = "test-mocks"))]
pub use mocks::{MockClientSurface, MockHostControl, MockNotificationDisplay, SurfaceCall};
