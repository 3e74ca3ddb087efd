use tracing::{info, warn};

use crate::config::DisplayConfig;
use crate::schedule::AlertRecord;
use crate::system::NotificationDisplay;

/// Vibration pattern attached to every delivered alert.
pub const VIBRATION_PATTERN: [u32; 5] = [300, 150, 300, 150, 400];

/// Action identifier for the confirm button.
pub const ACTION_CONFIRM: &str = "confirm";
/// Action identifier for the dismiss button.
pub const ACTION_DISMISS: &str = "dismiss";

/// One interactive action button on a displayed alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertAction {
    pub action: String,
    pub title: String,
}

/// Everything the host notification capability needs to render one alert.
///
/// `tag` is the host's de-duplication key: a later request with the same tag
/// replaces a prior undismissed alert rather than stacking a second one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRequest {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub vibration: Vec<u32>,
    pub tag: String,
    pub require_interaction: bool,
    pub actions: Vec<AlertAction>,
    /// Opaque payload carried back by the interaction callback.
    pub todo_id: String,
}

impl DisplayRequest {
    pub fn from_record(record: &AlertRecord, display: &DisplayConfig) -> Self {
        Self {
            title: record.title.clone(),
            body: record.body.clone(),
            icon: display.icon.clone(),
            badge: display.badge.clone(),
            vibration: VIBRATION_PATTERN.to_vec(),
            tag: record.key.clone(),
            require_interaction: true,
            actions: vec![
                AlertAction {
                    action: ACTION_CONFIRM.to_string(),
                    title: display.confirm_label.clone(),
                },
                AlertAction {
                    action: ACTION_DISMISS.to_string(),
                    title: display.dismiss_label.clone(),
                },
            ],
            todo_id: record.todo_id.clone(),
        }
    }
}

/// Submits fire-now records to the host notification capability.
///
/// Submission is fire-and-forget: no return value is consulted and failures
/// are not retried. The only observable failure mode is a missed alert.
pub struct Dispatcher<D: NotificationDisplay> {
    display: D,
    display_config: DisplayConfig,
}

impl<D: NotificationDisplay> Dispatcher<D> {
    pub fn new(display: D, display_config: DisplayConfig) -> Self {
        Self {
            display,
            display_config,
        }
    }

    /// Submit every fire-now record for display. Returns the number of
    /// submissions that were accepted by the host.
    pub fn dispatch_all(&self, records: &[AlertRecord]) -> usize {
        let mut submitted = 0;

        for record in records {
            let request = DisplayRequest::from_record(record, &self.display_config);
            match self.display.show(&request) {
                Ok(()) => {
                    info!(key = %record.key, title = %record.title, "Dispatched alert");
                    submitted += 1;
                }
                Err(e) => {
                    warn!(key = %record.key, error = %e, "Alert display submission failed");
                }
            }
        }

        submitted
    }

    #[cfg(any(test, feature = "test-mocks"))]
    pub fn display(&self) -> &D {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockNotificationDisplay;

    fn record(key: &str) -> AlertRecord {
        AlertRecord::new(
            key.to_string(),
            format!("todo-{key}"),
            format!("title-{key}"),
            0,
        )
        .with_body(format!("body-{key}"))
    }

    #[test]
    fn request_carries_fixed_parameters() {
        let request = DisplayRequest::from_record(&record("k1"), &DisplayConfig::default());

        assert_eq!(request.vibration, vec![300, 150, 300, 150, 400]);
        assert_eq!(request.tag, "k1");
        assert!(request.require_interaction);
        assert_eq!(request.actions.len(), 2);
        assert_eq!(request.actions[0].action, ACTION_CONFIRM);
        assert_eq!(request.actions[1].action, ACTION_DISMISS);
        assert_eq!(request.todo_id, "todo-k1");
    }

    #[test]
    fn dispatch_submits_every_record() {
        let dispatcher = Dispatcher::new(MockNotificationDisplay::new(), DisplayConfig::default());
        let records = vec![record("a"), record("b")];

        assert_eq!(dispatcher.dispatch_all(&records), 2);
        let shown = dispatcher.display().shown_requests();
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].tag, "a");
        assert_eq!(shown[1].tag, "b");
    }

    #[test]
    fn display_failure_is_swallowed_without_retry() {
        let display = MockNotificationDisplay::new();
        display.set_show_failure(true);
        let dispatcher = Dispatcher::new(display, DisplayConfig::default());

        assert_eq!(dispatcher.dispatch_all(&[record("a")]), 0);
        assert_eq!(dispatcher.display().show_attempts(), 1);
    }
}
