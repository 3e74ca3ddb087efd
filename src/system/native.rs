use anyhow::Result;
use std::process::{Command, Stdio};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::traits::{ClientHandle, ClientSurface, HostControl, NotificationDisplay};
use crate::dispatch::DisplayRequest;
use crate::interaction::InteractionEvent;

/// Production notification display using the desktop `notify-send` tool.
///
/// Submission is fire-and-forget: the command is spawned and the tick is
/// never kept waiting. When the tool supports `--action`, it stays alive
/// until the user acts and prints the chosen action id to stdout; a detached
/// thread collects that and forwards it as an [`InteractionEvent`]. A closed
/// alert that prints nothing produces no event.
pub struct DesktopNotificationDisplay {
    interaction_tx: Option<mpsc::UnboundedSender<InteractionEvent>>,
}

impl DesktopNotificationDisplay {
    pub fn new(interaction_tx: Option<mpsc::UnboundedSender<InteractionEvent>>) -> Self {
        Self { interaction_tx }
    }
}

impl NotificationDisplay for DesktopNotificationDisplay {
    fn show(&self, request: &DisplayRequest) -> Result<()> {
        let mut command = Command::new("notify-send");
        command
            .arg("--app-name=reminder-notifier")
            .arg(format!("--icon={}", request.icon))
            .arg("--urgency=critical");

        for action in &request.actions {
            command.arg(format!("--action={}={}", action.action, action.title));
        }

        command
            .arg(&request.title)
            .arg(&request.body)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = command.spawn()?;

        // Collect the interaction result without blocking the tick.
        let interaction_tx = self.interaction_tx.clone();
        let tag = request.tag.clone();
        let todo_id = request.todo_id.clone();
        std::thread::spawn(move || {
            let output = match child.wait_with_output() {
                Ok(output) => output,
                Err(e) => {
                    warn!(tag = %tag, error = %e, "notify-send did not complete");
                    return;
                }
            };

            if !output.status.success() {
                let error = String::from_utf8_lossy(&output.stderr);
                warn!(tag = %tag, error = %error, "notify-send failed");
                return;
            }

            let action = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if action.is_empty() {
                debug!(tag = %tag, "Alert closed without interaction");
                return;
            }

            if let Some(tx) = interaction_tx {
                let _ = tx.send(InteractionEvent {
                    action: Some(action),
                    tag,
                    todo_id,
                });
            }
        });

        Ok(())
    }
}

/// Production client surface using `xdotool` for window enumeration/focus
/// and `xdg-open` for opening the application root.
pub struct DesktopClientSurface {
    /// Window-search pattern identifying the application's own windows.
    window_class: String,
}

impl DesktopClientSurface {
    pub fn new(window_class: String) -> Self {
        Self { window_class }
    }
}

impl ClientSurface for DesktopClientSurface {
    fn close_notification(&self, tag: &str) -> Result<()> {
        // The desktop shell owns displayed notifications; there is no
        // portable close-by-tag call, so teardown is left to the shell.
        debug!(tag = %tag, "Notification close delegated to desktop shell");
        Ok(())
    }

    fn list_clients(&self) -> Result<Vec<ClientHandle>> {
        let output = Command::new("xdotool")
            .args(["search", "--class", &self.window_class])
            .output()?;

        if !output.status.success() {
            // xdotool exits non-zero when nothing matches; treat as no clients
            return Ok(Vec::new());
        }

        let clients = String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| ClientHandle {
                id: line.trim().to_string(),
                focusable: true,
            })
            .collect();

        Ok(clients)
    }

    fn focus(&self, client: &ClientHandle) -> Result<()> {
        let output = Command::new("xdotool")
            .args(["windowactivate", &client.id])
            .output()?;

        if output.status.success() {
            Ok(())
        } else {
            let error = String::from_utf8_lossy(&output.stderr);
            Err(anyhow::anyhow!(
                "xdotool windowactivate failed for {}: {}",
                client.id,
                error
            ))
        }
    }

    fn open_window(&self, url: &str) -> Result<()> {
        let output = Command::new("xdg-open").arg(url).output()?;

        if output.status.success() {
            Ok(())
        } else {
            let error = String::from_utf8_lossy(&output.stderr);
            Err(anyhow::anyhow!("xdg-open failed for {}: {}", url, error))
        }
    }
}

/// Production host control. A plain desktop process has no waiting-instance
/// handoff, so promotion reduces to acknowledging the request.
pub struct DesktopHostControl;

impl HostControl for DesktopHostControl {
    fn promote_active(&self) -> Result<()> {
        info!("Immediate activation requested; process is already active");
        Ok(())
    }
}
