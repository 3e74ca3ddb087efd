use tracing::debug;

use super::record::{AlertRecord, Classification};

/// Result of partitioning the pending set on one poll tick.
#[derive(Debug, Default)]
pub struct TickPartition {
    /// Records inside the fire window; handed to the dispatcher.
    pub fire: Vec<AlertRecord>,
    /// Records still more than a window in the future; the store's new
    /// contents.
    pub keep: Vec<AlertRecord>,
    /// Count of records whose window closed unobserved; discarded.
    pub dropped: usize,
}

/// Evaluate every record against `now_ms` and split it into the three
/// mutually exclusive classifications. Fire-now and drop-missed records both
/// leave the pending set; only keep-pending survives to the next tick.
pub fn partition_due(
    records: Vec<AlertRecord>,
    now_ms: i64,
    window_ms: i64,
) -> TickPartition {
    let mut partition = TickPartition::default();

    for record in records {
        match record.classify(now_ms, window_ms) {
            Classification::FireNow => partition.fire.push(record),
            Classification::KeepPending => partition.keep.push(record),
            Classification::DropMissed => {
                debug!(
                    key = %record.key,
                    alert_time = record.alert_time,
                    now = now_ms,
                    "Dropping missed alert"
                );
                partition.dropped += 1;
            }
        }
    }

    partition
}
