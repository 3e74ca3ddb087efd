pub mod config;
pub mod control;
pub mod dispatch;
pub mod interaction;
pub mod logging;
pub mod schedule;
pub mod service;
pub mod system;

pub use config::Config;
pub use control::ControlMessage;
pub use schedule::{AlertRecord, SchedulerEngine};
