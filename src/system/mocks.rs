use anyhow::Result;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::traits::{ClientHandle, ClientSurface, HostControl, NotificationDisplay};
use crate::dispatch::DisplayRequest;

/// Mock notification display for testing - records every submission and can
/// be configured to fail.
#[derive(Clone)]
pub struct MockNotificationDisplay {
    pub shown: Arc<Mutex<Vec<DisplayRequest>>>,
    pub attempts: Arc<AtomicUsize>,
    pub should_fail_show: Arc<AtomicBool>,
}

impl MockNotificationDisplay {
    pub fn new() -> Self {
        Self {
            shown: Arc::new(Mutex::new(Vec::new())),
            attempts: Arc::new(AtomicUsize::new(0)),
            should_fail_show: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get all requests that were successfully submitted
    pub fn shown_requests(&self) -> Vec<DisplayRequest> {
        self.shown.lock().unwrap().clone()
    }

    /// Get the number of show attempts, including failed ones
    pub fn show_attempts(&self) -> usize {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Configure the mock to fail show calls
    pub fn set_show_failure(&self, should_fail: bool) {
        self.should_fail_show.store(should_fail, Ordering::Relaxed);
    }

    /// Clear the submission history
    pub fn clear(&self) {
        self.shown.lock().unwrap().clear();
        self.attempts.store(0, Ordering::Relaxed);
    }
}

impl NotificationDisplay for MockNotificationDisplay {
    fn show(&self, request: &DisplayRequest) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::Relaxed);

        if self.should_fail_show.load(Ordering::Relaxed) {
            return Err(anyhow::anyhow!("Mock display failure"));
        }

        self.shown.lock().unwrap().push(request.clone());
        Ok(())
    }
}

impl Default for MockNotificationDisplay {
    fn default() -> Self {
        Self::new()
    }
}

/// Calls recorded by [`MockClientSurface`], in invocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    CloseNotification(String),
    ListClients,
    Focus(String),
    OpenWindow(String),
}

/// Mock client surface for testing - scripted client list plus a call log.
#[derive(Clone)]
pub struct MockClientSurface {
    pub clients: Arc<Mutex<Vec<ClientHandle>>>,
    pub calls: Arc<Mutex<Vec<SurfaceCall>>>,
    pub should_fail_focus: Arc<AtomicBool>,
    pub should_fail_open: Arc<AtomicBool>,
}

impl MockClientSurface {
    pub fn new() -> Self {
        Self {
            clients: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            should_fail_focus: Arc::new(AtomicBool::new(false)),
            should_fail_open: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Add a client to the scripted foreground-client list
    pub fn add_client(&self, client: ClientHandle) {
        self.clients.lock().unwrap().push(client);
    }

    /// Get all surface calls that were made
    pub fn recorded_calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Configure the mock to fail focus calls
    pub fn set_focus_failure(&self, should_fail: bool) {
        self.should_fail_focus.store(should_fail, Ordering::Relaxed);
    }

    /// Configure the mock to fail open-window calls
    pub fn set_open_failure(&self, should_fail: bool) {
        self.should_fail_open.store(should_fail, Ordering::Relaxed);
    }

    /// Clear the call log
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl ClientSurface for MockClientSurface {
    fn close_notification(&self, tag: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(SurfaceCall::CloseNotification(tag.to_string()));
        Ok(())
    }

    fn list_clients(&self) -> Result<Vec<ClientHandle>> {
        self.calls.lock().unwrap().push(SurfaceCall::ListClients);
        Ok(self.clients.lock().unwrap().clone())
    }

    fn focus(&self, client: &ClientHandle) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(SurfaceCall::Focus(client.id.clone()));

        if self.should_fail_focus.load(Ordering::Relaxed) {
            return Err(anyhow::anyhow!("Mock focus failure"));
        }
        Ok(())
    }

    fn open_window(&self, url: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(SurfaceCall::OpenWindow(url.to_string()));

        if self.should_fail_open.load(Ordering::Relaxed) {
            return Err(anyhow::anyhow!("Mock open-window failure"));
        }
        Ok(())
    }
}

impl Default for MockClientSurface {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock host control for testing - counts promotion requests.
#[derive(Clone)]
pub struct MockHostControl {
    pub promotions: Arc<AtomicUsize>,
}

impl MockHostControl {
    pub fn new() -> Self {
        Self {
            promotions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of promotion requests that were made
    pub fn promotion_count(&self) -> usize {
        self.promotions.load(Ordering::Relaxed)
    }
}

impl HostControl for MockHostControl {
    fn promote_active(&self) -> Result<()> {
        self.promotions.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

impl Default for MockHostControl {
    fn default() -> Self {
        Self::new()
    }
}
