use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::schedule::AlertRecord;

/// Inbound control message from the foreground application.
///
/// Wire format is a JSON object tagged by `type`, one message per line on the
/// daemon's control channel:
///
/// ```json
/// {"type":"syncNotifications","notifications":[...]}
/// {"type":"stopNotifications"}
/// {"type":"activateImmediately"}
/// ```
///
/// Each variant is independent and idempotent; messages are applied in
/// arrival order, strictly between poll ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ControlMessage {
    /// Promote this process to active now instead of waiting for the
    /// previous instance to finish (used during deployment of a new
    /// version).
    ActivateImmediately,
    /// Replace the schedule store wholesale and ensure the poller runs.
    #[serde(rename_all = "camelCase")]
    SyncNotifications {
        #[serde(default)]
        notifications: Vec<AlertRecord>,
    },
    /// Clear the schedule store; already-displayed alerts are unaffected.
    StopNotifications,
}

impl ControlMessage {
    /// Decode one line of the control channel.
    pub fn from_json_line(line: &str) -> Result<Self> {
        serde_json::from_str(line.trim())
            .with_context(|| format!("Failed to parse control message: {line}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_sync_with_records() {
        let line = r#"{"type":"syncNotifications","notifications":[
            {"key":"k1","todoId":"t1","title":"A","body":"b","alertTime":123}
        ]}"#;

        let msg = ControlMessage::from_json_line(line).unwrap();
        match msg {
            ControlMessage::SyncNotifications { notifications } => {
                assert_eq!(notifications.len(), 1);
                assert_eq!(notifications[0].key, "k1");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn decodes_sync_with_missing_notifications_as_empty() {
        let msg = ControlMessage::from_json_line(r#"{"type":"syncNotifications"}"#).unwrap();
        assert_eq!(
            msg,
            ControlMessage::SyncNotifications {
                notifications: Vec::new()
            }
        );
    }

    #[test]
    fn decodes_bare_messages() {
        assert_eq!(
            ControlMessage::from_json_line(r#"{"type":"stopNotifications"}"#).unwrap(),
            ControlMessage::StopNotifications
        );
        assert_eq!(
            ControlMessage::from_json_line(r#"{"type":"activateImmediately"}"#).unwrap(),
            ControlMessage::ActivateImmediately
        );
    }

    #[test]
    fn rejects_unknown_type() {
        assert!(ControlMessage::from_json_line(r#"{"type":"selfDestruct"}"#).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(ControlMessage::from_json_line("{not json").is_err());
    }
}
