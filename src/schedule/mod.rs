pub mod engine;
pub mod poller;
pub mod record;
pub mod store;

// Re-export commonly used types
pub use engine::{SchedulerEngine, TickOutcome};
pub use poller::{TickPartition, partition_due};
pub use record::{
    AlertRecord, Classification, DEFAULT_FIRE_WINDOW_MS, DEFAULT_POLL_INTERVAL_MS,
    epoch_millis_now,
};
pub use store::ScheduleStore;
