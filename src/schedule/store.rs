use tracing::debug;

use super::record::AlertRecord;

/// In-memory set of pending alerts.
///
/// Mutated only by whole-set replacement or clearing; the foreground app is
/// the single source of truth for its contents, so no partial-update
/// operation exists. Duplicate keys are passed through untouched (the host
/// display coalesces by tag). Never persisted.
#[derive(Debug, Default)]
pub struct ScheduleStore {
    pending: Vec<AlertRecord>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Discard the current contents and install `records` as the new
    /// pending set.
    pub fn replace_all(&mut self, records: Vec<AlertRecord>) {
        debug!(
            previous = self.pending.len(),
            new = records.len(),
            "Replacing schedule store contents"
        );
        self.pending = records;
    }

    /// Empty the pending set. Already-displayed alerts are unaffected.
    pub fn clear(&mut self) {
        debug!(discarded = self.pending.len(), "Clearing schedule store");
        self.pending.clear();
    }

    /// Take ownership of the pending set, leaving the store empty. Used by
    /// the poller to partition a tick without cloning.
    pub(crate) fn take_pending(&mut self) -> Vec<AlertRecord> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[AlertRecord] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
