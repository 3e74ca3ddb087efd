use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance around `alert_time` within which a poll tick may fire an alert.
/// Compensates for the coarse tick cadence landing slightly before or after
/// the exact target time.
pub const DEFAULT_FIRE_WINDOW_MS: i64 = 15_000;

/// Default cadence of the due-check poller.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 8_000;

/// Current wall-clock time as epoch milliseconds.
pub fn epoch_millis_now() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// One scheduled reminder, as pushed by the foreground application.
///
/// The engine never interprets `todo_id`; it is carried opaquely into the
/// display payload so the foreground app can pick it back up after an
/// interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub key: String,
    pub todo_id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Absolute target time, epoch milliseconds.
    pub alert_time: i64,
    /// Reserved for the foreground app; the tick algorithm never consults it.
    #[serde(default)]
    pub fired: bool,
}

/// Outcome of evaluating one record against the current time on a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Within the fire window; hand to the dispatcher and remove.
    FireNow,
    /// Still more than a window ahead; re-evaluate next tick.
    KeepPending,
    /// The window closed before any tick observed it; discard silently.
    DropMissed,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::FireNow => write!(f, "fire-now"),
            Classification::KeepPending => write!(f, "keep-pending"),
            Classification::DropMissed => write!(f, "drop-missed"),
        }
    }
}

impl AlertRecord {
    pub fn new(key: String, todo_id: String, title: String, alert_time: i64) -> Self {
        Self {
            key,
            todo_id,
            title,
            body: String::new(),
            alert_time,
            fired: false,
        }
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = body;
        self
    }

    /// Classify this record at `now_ms` against a symmetric `window_ms`
    /// tolerance. Window bounds are inclusive on both sides.
    pub fn classify(&self, now_ms: i64, window_ms: i64) -> Classification {
        let diff = self.alert_time - now_ms;
        if (-window_ms..=window_ms).contains(&diff) {
            Classification::FireNow
        } else if diff > window_ms {
            Classification::KeepPending
        } else {
            Classification::DropMissed
        }
    }
}
