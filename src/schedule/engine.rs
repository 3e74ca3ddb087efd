use tracing::{debug, info, warn};

use super::poller::partition_due;
use super::store::ScheduleStore;
use crate::control::ControlMessage;
use crate::dispatch::Dispatcher;
use crate::system::{HostControl, NotificationDisplay};

/// Summary of one poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Records selected fire-now and handed to the dispatcher.
    pub fired: usize,
    /// Records whose window closed unobserved; discarded without dispatch.
    pub dropped: usize,
    /// Records surviving as the store's new pending set.
    pub kept: usize,
    /// Whether the poller should keep ticking after this tick.
    pub poller_running: bool,
}

/// The scheduling engine: schedule store, due-check poller, dispatcher, and
/// lifecycle control in one place.
///
/// All temporal logic takes `now_ms` as a parameter so the engine is
/// deterministic under test; the daemon loop supplies wall-clock time and
/// owns the actual timer. The engine itself is single-threaded: control
/// messages and ticks are applied strictly one after another, never
/// interleaved.
pub struct SchedulerEngine<D: NotificationDisplay, H: HostControl> {
    store: ScheduleStore,
    dispatcher: Dispatcher<D>,
    host: H,
    fire_window_ms: i64,
    poller_running: bool,
}

impl<D: NotificationDisplay, H: HostControl> SchedulerEngine<D, H> {
    pub fn new(dispatcher: Dispatcher<D>, host: H, fire_window_ms: i64) -> Self {
        Self {
            store: ScheduleStore::new(),
            dispatcher,
            host,
            fire_window_ms,
            poller_running: false,
        }
    }

    /// Apply one inbound control message. Every variant is idempotent and
    /// total; host-call failures are logged and swallowed.
    pub fn apply_message(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::ActivateImmediately => {
                info!("Applying immediate activation request");
                if let Err(e) = self.host.promote_active() {
                    warn!(error = %e, "Host promotion failed");
                }
            }
            ControlMessage::SyncNotifications { notifications } => {
                info!(count = notifications.len(), "Syncing notification schedule");
                self.store.replace_all(notifications);

                // An empty sync leaves nothing to check, so it does not arm
                // the poller.
                if !self.poller_running && !self.store.is_empty() {
                    info!("Starting due-check poller");
                    self.poller_running = true;
                }
            }
            ControlMessage::StopNotifications => {
                info!("Stopping notification schedule");
                // Already-displayed alerts are unaffected; the poller stops
                // on its next tick when it observes the empty store.
                self.store.clear();
            }
        }
    }

    /// Run one due-check tick at `now_ms`: partition the pending set,
    /// dispatch the fire-now subset, install the keep-pending subset, and
    /// stop the poller if nothing survives.
    pub fn run_tick(&mut self, now_ms: i64) -> TickOutcome {
        let partition = partition_due(self.store.take_pending(), now_ms, self.fire_window_ms);

        let submitted = self.dispatcher.dispatch_all(&partition.fire);

        let outcome = TickOutcome {
            fired: partition.fire.len(),
            dropped: partition.dropped,
            kept: partition.keep.len(),
            poller_running: !partition.keep.is_empty(),
        };

        self.store.replace_all(partition.keep);

        if self.store.is_empty() && self.poller_running {
            info!("Pending set empty, stopping due-check poller");
            self.poller_running = false;
        }

        debug!(
            fired = outcome.fired,
            submitted,
            dropped = outcome.dropped,
            kept = outcome.kept,
            "Poll tick complete"
        );

        outcome
    }

    /// Whether the periodic ticker should currently be armed.
    pub fn poller_running(&self) -> bool {
        self.poller_running
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    #[cfg(any(test, feature = "test-mocks"))]
    pub fn dispatcher(&self) -> &Dispatcher<D> {
        &self.dispatcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::schedule::record::{AlertRecord, DEFAULT_FIRE_WINDOW_MS};
    use crate::system::{MockHostControl, MockNotificationDisplay};

    fn engine() -> SchedulerEngine<MockNotificationDisplay, MockHostControl> {
        SchedulerEngine::new(
            Dispatcher::new(MockNotificationDisplay::new(), DisplayConfig::default()),
            MockHostControl::new(),
            DEFAULT_FIRE_WINDOW_MS,
        )
    }

    fn record(key: &str, alert_time: i64) -> AlertRecord {
        AlertRecord::new(
            key.to_string(),
            format!("todo-{key}"),
            format!("title-{key}"),
            alert_time,
        )
    }

    #[test]
    fn sync_replaces_store_and_starts_poller() {
        let mut engine = engine();
        engine.apply_message(ControlMessage::SyncNotifications {
            notifications: vec![record("a", 100), record("b", 200)],
        });

        assert_eq!(engine.store().len(), 2);
        assert!(engine.poller_running());

        engine.apply_message(ControlMessage::SyncNotifications {
            notifications: vec![record("c", 300)],
        });
        assert_eq!(engine.store().len(), 1);
        assert_eq!(engine.store().pending()[0].key, "c");
    }

    #[test]
    fn empty_sync_does_not_start_poller() {
        let mut engine = engine();
        engine.apply_message(ControlMessage::SyncNotifications {
            notifications: Vec::new(),
        });

        assert!(engine.store().is_empty());
        assert!(!engine.poller_running());
    }

    #[test]
    fn stop_clears_store_and_poller_stops_on_next_tick() {
        let mut engine = engine();
        engine.apply_message(ControlMessage::SyncNotifications {
            notifications: vec![record("a", 1_000_000)],
        });
        assert!(engine.poller_running());

        engine.apply_message(ControlMessage::StopNotifications);
        assert!(engine.store().is_empty());
        // The running flag clears at tick boundaries, not on stop itself.
        assert!(engine.poller_running());

        let outcome = engine.run_tick(0);
        assert_eq!(outcome.fired, 0);
        assert!(!outcome.poller_running);
        assert!(!engine.poller_running());
    }

    #[test]
    fn activate_immediately_forwards_to_host() {
        let host = MockHostControl::new();
        let mut engine = SchedulerEngine::new(
            Dispatcher::new(MockNotificationDisplay::new(), DisplayConfig::default()),
            host.clone(),
            DEFAULT_FIRE_WINDOW_MS,
        );

        engine.apply_message(ControlMessage::ActivateImmediately);
        engine.apply_message(ControlMessage::ActivateImmediately);
        assert_eq!(host.promotion_count(), 2);
    }

    #[test]
    fn tick_fires_record_inside_window() {
        let now = 10_000_000;
        let mut engine = engine();
        engine.apply_message(ControlMessage::SyncNotifications {
            notifications: vec![record("due", now - 3_000)],
        });

        let outcome = engine.run_tick(now);
        assert_eq!(outcome.fired, 1);
        assert_eq!(outcome.kept, 0);
        assert!(!outcome.poller_running);

        let shown = engine.dispatcher().display().shown_requests();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].tag, "due");
    }

    #[test]
    fn tick_keeps_far_future_record_and_poller_running() {
        let now = 10_000_000;
        let mut engine = engine();
        engine.apply_message(ControlMessage::SyncNotifications {
            notifications: vec![record("future", now + 50_000)],
        });

        let outcome = engine.run_tick(now);
        assert_eq!(outcome.fired, 0);
        assert_eq!(outcome.kept, 1);
        assert!(outcome.poller_running);
        assert!(engine.poller_running());
    }

    #[test]
    fn tick_drops_missed_record_without_dispatch() {
        let now = 10_000_000;
        let mut engine = engine();
        engine.apply_message(ControlMessage::SyncNotifications {
            notifications: vec![record("missed", now - 20_000)],
        });

        let outcome = engine.run_tick(now);
        assert_eq!(outcome.fired, 0);
        assert_eq!(outcome.dropped, 1);
        assert!(engine.store().is_empty());
        assert!(!engine.poller_running());
        assert!(engine.dispatcher().display().shown_requests().is_empty());
    }

    #[test]
    fn display_failure_still_removes_record_from_store() {
        let now = 10_000_000;
        let mut engine = engine();
        engine.dispatcher().display().set_show_failure(true);
        engine.apply_message(ControlMessage::SyncNotifications {
            notifications: vec![record("due", now)],
        });

        let outcome = engine.run_tick(now);
        assert_eq!(outcome.fired, 1);
        assert!(engine.store().is_empty());
        assert_eq!(engine.dispatcher().display().show_attempts(), 1);
    }
}
