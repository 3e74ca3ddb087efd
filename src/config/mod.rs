pub mod types;

pub use types::{Config, DisplayConfig, GeneralConfig};
