use anyhow::Result;
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

/// Logging configuration for the daemon.
pub struct LoggingConfig {
    pub level: Level,
    pub file_output: bool,
    pub console_output: bool,
    pub log_dir: Option<PathBuf>,
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            file_output: false,
            console_output: true,
            log_dir: None,
            json_format: false,
        }
    }
}

/// Initialize logging with optional file rotation and structured output.
///
/// Returns the appender worker guard, which must be held for the life of the
/// process when file output is enabled.
pub fn initialize_logging(config: LoggingConfig) -> Result<Option<WorkerGuard>> {
    let mut layers = Vec::new();
    let mut guard = None;

    let env_filter = EnvFilter::new(format!(
        "reminder_notifier={}",
        config.level.as_str().to_lowercase()
    ));

    // Console output layer
    if config.console_output {
        let console_layer = if config.json_format {
            fmt::layer()
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .boxed()
        };
        layers.push(console_layer);
    }

    // File output layer with daily rotation
    if config.file_output {
        let dir = match config.log_dir.clone() {
            Some(dir) => dir,
            None => default_log_dir()?,
        };
        std::fs::create_dir_all(&dir)?;

        let file_appender = tracing_appender::rolling::daily(&dir, "reminder-notifier.log");
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(non_blocking)
            .boxed();
        layers.push(file_layer);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .init();

    Ok(guard)
}

/// Get the default log directory path
pub fn default_log_dir() -> Result<PathBuf> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Failed to get home directory"))?;
    Ok(home_dir.join(".local/share/reminder-notifier/logs"))
}
