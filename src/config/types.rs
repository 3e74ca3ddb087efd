use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::schedule::{DEFAULT_FIRE_WINDOW_MS, DEFAULT_POLL_INTERVAL_MS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Cadence of the due-check poller in milliseconds.
    pub poll_interval_ms: u64,
    /// Symmetric tolerance around an alert's target time.
    pub fire_window_ms: i64,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub icon: String,
    pub badge: String,
    /// Where a new client window is opened when no foreground client exists.
    pub app_root_url: String,
    /// Window-class pattern identifying the application's own windows.
    pub app_window_class: String,
    pub confirm_label: String,
    pub dismiss_label: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            fire_window_ms: DEFAULT_FIRE_WINDOW_MS,
            log_level: "info".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            icon: "./icon-192.png".to_string(),
            badge: "./icon-192.png".to_string(),
            app_root_url: "./".to_string(),
            app_window_class: "reminder-app".to_string(),
            confirm_label: "Confirm".to_string(),
            dismiss_label: "Dismiss".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = match config_path {
            Some(path) => PathBuf::from(path),
            None => Self::default_config_path()?,
        };

        debug!("Loading configuration from: {}", path.display());

        if !path.exists() {
            info!("Configuration file not found, creating default configuration");
            return Self::create_default_config(&path);
        }

        let config_content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.poll_interval_ms < 100 {
            anyhow::bail!(
                "poll_interval_ms must be at least 100 (got {})",
                self.general.poll_interval_ms
            );
        }

        if self.general.fire_window_ms < (self.general.poll_interval_ms as i64) / 2 {
            anyhow::bail!(
                "fire_window_ms ({}) narrower than half the poll interval ({}) can skip alerts",
                self.general.fire_window_ms,
                self.general.poll_interval_ms
            );
        }

        Ok(())
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Failed to get user configuration directory"))?;
        Ok(config_dir.join("reminder-notifier/config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<Self> {
        let config = Config::default();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content =
            toml::to_string_pretty(&config).context("Failed to serialize default configuration")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write default config: {}", path.display()))?;

        info!("Default configuration written to: {}", path.display());
        Ok(config)
    }
}
