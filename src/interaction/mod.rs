use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::dispatch::ACTION_DISMISS;
use crate::system::ClientSurface;

/// User interaction with a displayed alert, as reported by the host.
///
/// `action` is the identifier of the pressed button (`"confirm"` or
/// `"dismiss"`), or `None` for a plain click on the alert body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionEvent {
    #[serde(default)]
    pub action: Option<String>,
    pub tag: String,
    /// Opaque payload set at dispatch time; forwarded to the foreground app.
    pub todo_id: String,
}

/// Reacts to user interaction with a delivered alert.
///
/// Dismiss closes the alert and nothing more. Confirm or a plain activation
/// additionally reconnects the user to the foreground app: focus an existing
/// client window if one exists, otherwise open a new one at the app root.
/// No business logic happens here; `todo_id` is only carried.
pub struct InteractionHandler<C: ClientSurface> {
    clients: C,
    app_root_url: String,
}

impl<C: ClientSurface> InteractionHandler<C> {
    pub fn new(clients: C, app_root_url: String) -> Self {
        Self {
            clients,
            app_root_url,
        }
    }

    pub fn handle(&self, event: &InteractionEvent) -> Result<()> {
        debug!(tag = %event.tag, action = ?event.action, "Handling alert interaction");

        self.clients.close_notification(&event.tag)?;

        if event.action.as_deref() == Some(ACTION_DISMISS) {
            debug!(tag = %event.tag, "Alert dismissed");
            return Ok(());
        }

        self.bring_to_foreground(event)
    }

    fn bring_to_foreground(&self, event: &InteractionEvent) -> Result<()> {
        let clients = self.clients.list_clients()?;

        if let Some(client) = clients.iter().find(|c| c.focusable) {
            info!(
                tag = %event.tag,
                client = %client.id,
                todo_id = %event.todo_id,
                "Focusing existing client"
            );
            return self.clients.focus(client);
        }

        info!(
            tag = %event.tag,
            url = %self.app_root_url,
            todo_id = %event.todo_id,
            "No foreground client, opening new window"
        );

        if let Err(e) = self.clients.open_window(&self.app_root_url) {
            warn!(error = %e, "Failed to open application window");
            return Err(e);
        }

        Ok(())
    }

    #[cfg(any(test, feature = "test-mocks"))]
    pub fn clients(&self) -> &C {
        &self.clients
    }
}
