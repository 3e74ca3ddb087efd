use anyhow::Result;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::signals::{SignalHandler, SignalType};
use crate::config::Config;
use crate::control::ControlMessage;
use crate::dispatch::Dispatcher;
use crate::interaction::{InteractionEvent, InteractionHandler};
use crate::schedule::{SchedulerEngine, epoch_millis_now};
use crate::system::{
    ClientSurface, DesktopClientSurface, DesktopHostControl, DesktopNotificationDisplay,
    HostControl, NotificationDisplay,
};

/// Runs the scheduling engine as a long-lived daemon task.
///
/// One logical thread of control: a single `select!` loop applies inbound
/// control messages, interaction events, poll ticks, and shutdown signals
/// strictly one at a time, so the engine needs no locking. The ticker is the
/// only cancellable resource; it is armed when the engine's poller starts
/// and dropped when a tick leaves the pending set empty.
pub struct NotifierDaemon<D: NotificationDisplay, H: HostControl, C: ClientSurface> {
    config: Config,
    engine: SchedulerEngine<D, H>,
    interactions: InteractionHandler<C>,
    /// Exit once the poller stops instead of idling (used by one-shot CLI
    /// commands).
    exit_when_idle: bool,
}

impl NotifierDaemon<DesktopNotificationDisplay, DesktopHostControl, DesktopClientSurface> {
    /// Build a daemon wired to the real desktop capabilities. Returns the
    /// daemon plus the interaction channel its display reports into.
    pub fn new_desktop(config: Config) -> (Self, mpsc::UnboundedReceiver<InteractionEvent>) {
        let (interaction_tx, interaction_rx) = mpsc::unbounded_channel();

        let display = DesktopNotificationDisplay::new(Some(interaction_tx));
        let dispatcher = Dispatcher::new(display, config.display.clone());
        let engine = SchedulerEngine::new(
            dispatcher,
            DesktopHostControl,
            config.general.fire_window_ms,
        );

        let clients = DesktopClientSurface::new(config.display.app_window_class.clone());
        let interactions = InteractionHandler::new(clients, config.display.app_root_url.clone());

        let daemon = Self {
            config,
            engine,
            interactions,
            exit_when_idle: false,
        };

        (daemon, interaction_rx)
    }
}

impl<D: NotificationDisplay, H: HostControl, C: ClientSurface> NotifierDaemon<D, H, C> {
    pub fn new(
        config: Config,
        engine: SchedulerEngine<D, H>,
        interactions: InteractionHandler<C>,
    ) -> Self {
        Self {
            config,
            engine,
            interactions,
            exit_when_idle: false,
        }
    }

    pub fn exit_when_idle(mut self, exit_when_idle: bool) -> Self {
        self.exit_when_idle = exit_when_idle;
        self
    }

    /// Apply a control message before entering the loop (used by one-shot
    /// CLI commands to seed the schedule).
    pub fn seed_message(&mut self, message: ControlMessage) {
        self.engine.apply_message(message);
    }

    /// Run until shutdown is signalled, the control channel closes with no
    /// work left, or (with `exit_when_idle`) the poller stops.
    pub async fn run(
        mut self,
        control_rx: mpsc::UnboundedReceiver<ControlMessage>,
        mut interaction_rx: mpsc::UnboundedReceiver<InteractionEvent>,
    ) -> Result<()> {
        info!(
            poll_interval_ms = self.config.general.poll_interval_ms,
            fire_window_ms = self.config.general.fire_window_ms,
            "Starting reminder notifier daemon"
        );

        let (signal_tx, mut signal_rx) = mpsc::unbounded_channel::<SignalType>();
        let signal_handler = SignalHandler::with_sender(signal_tx);
        {
            let signal_handler = signal_handler.clone();
            tokio::spawn(async move {
                if let Err(e) = signal_handler.listen_for_signals().await {
                    error!("Signal handler error: {}", e);
                }
            });
        }

        let tick_period = Duration::from_millis(self.config.general.poll_interval_ms);
        let mut ticker: Option<Interval> = None;
        let mut control_rx = Some(control_rx);

        loop {
            // Reconcile the armed timer with the engine's poller state.
            match (self.engine.poller_running(), ticker.is_some()) {
                (true, false) => {
                    debug!("Arming poll ticker");
                    let mut interval =
                        tokio::time::interval_at(Instant::now() + tick_period, tick_period);
                    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    ticker = Some(interval);
                }
                (false, true) => {
                    debug!("Disarming poll ticker");
                    ticker = None;
                }
                _ => {}
            }

            if self.exit_when_idle && !self.engine.poller_running() {
                info!("Pending set delivered, exiting");
                break;
            }

            tokio::select! {
                message = recv_control(&mut control_rx) => {
                    match message {
                        Some(message) => self.engine.apply_message(message),
                        None => {
                            info!("Control channel closed");
                            control_rx = None;
                            if self.engine.store().is_empty() && !self.engine.poller_running() {
                                break;
                            }
                        }
                    }
                }
                Some(event) = interaction_rx.recv() => {
                    if let Err(e) = self.interactions.handle(&event) {
                        warn!(tag = %event.tag, error = %e, "Interaction handling failed");
                    }
                }
                _ = next_tick(&mut ticker) => {
                    self.engine.run_tick(epoch_millis_now());

                    // With the controller gone no new work can arrive, so an
                    // emptied schedule means the daemon is done.
                    if control_rx.is_none() && !self.engine.poller_running() {
                        info!("Control channel closed and schedule drained, exiting");
                        break;
                    }
                }
                _ = signal_rx.recv() => {
                    info!("Shutdown signal received, stopping daemon");
                    break;
                }
            }
        }

        info!("Daemon stopped");
        Ok(())
    }
}

/// Receive from the control channel, or park forever once it has closed so
/// the select loop is not spun by a drained receiver.
async fn recv_control(
    control_rx: &mut Option<mpsc::UnboundedReceiver<ControlMessage>>,
) -> Option<ControlMessage> {
    match control_rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

/// Await the next tick of an armed ticker, or park forever when disarmed.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Read the control channel from stdin: one JSON message per line, malformed
/// lines logged and skipped. The channel closes on EOF.
pub fn spawn_stdin_control(tx: mpsc::UnboundedSender<ControlMessage>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match ControlMessage::from_json_line(&line) {
                        Ok(message) => {
                            if tx.send(message).is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!(error = %e, "Skipping malformed control message"),
                    }
                }
                Ok(None) => {
                    debug!("Control stdin reached EOF");
                    break;
                }
                Err(e) => {
                    error!(error = %e, "Failed reading control stdin");
                    break;
                }
            }
        }
    });
}
