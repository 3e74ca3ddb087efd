pub mod daemon;
pub mod signals;

pub use daemon::{NotifierDaemon, spawn_stdin_control};
pub use signals::{SignalHandler, SignalType};
