use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::{Level, info};

use reminder_notifier::config::Config;
use reminder_notifier::control::ControlMessage;
use reminder_notifier::dispatch::DisplayRequest;
use reminder_notifier::logging::{LoggingConfig, initialize_logging};
use reminder_notifier::schedule::{AlertRecord, epoch_millis_now};
use reminder_notifier::service::{NotifierDaemon, spawn_stdin_control};
use reminder_notifier::system::{DesktopNotificationDisplay, NotificationDisplay};

#[derive(Parser)]
#[command(name = "reminder-notifier")]
#[command(about = "Background reminder delivery daemon with windowed due-checking")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the delivery daemon, reading control messages from stdin
    Daemon {
        /// Also write logs to the rotating log file
        #[arg(long)]
        log_file: bool,
    },
    /// Validate configuration file
    CheckConfig,
    /// Send a test alert through the desktop display path
    TestNotification,
    /// Schedule a single reminder and exit once it is delivered
    Schedule {
        /// Seconds from now at which the alert should fire
        #[arg(short, long)]
        r#in: u64,
        /// Alert title
        #[arg(short, long)]
        title: String,
        /// Alert body
        #[arg(short, long, default_value = "")]
        body: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let log_file = matches!(cli.command, Some(Commands::Daemon { log_file: true }));
    let _guard = initialize_logging(LoggingConfig {
        level,
        file_output: log_file,
        ..LoggingConfig::default()
    })?;

    info!("Starting reminder notifier");

    let config = Config::load(cli.config.as_deref())?;
    info!("Configuration loaded successfully");

    match cli.command {
        Some(Commands::Daemon { .. }) => {
            run_daemon(config).await?;
        }
        Some(Commands::CheckConfig) => {
            check_config(&config)?;
        }
        Some(Commands::TestNotification) => {
            test_notification(&config)?;
        }
        Some(Commands::Schedule { r#in, title, body }) => {
            schedule_one(config, r#in, title, body).await?;
        }
        None => {
            // Default behavior - run daemon if no command specified
            info!("No command specified, running in daemon mode");
            run_daemon(config).await?;
        }
    }

    Ok(())
}

async fn run_daemon(config: Config) -> Result<()> {
    let (daemon, interaction_rx) = NotifierDaemon::new_desktop(config);

    let (control_tx, control_rx) = mpsc::unbounded_channel();
    spawn_stdin_control(control_tx);

    println!("Reminder notifier daemon started");
    println!("  Control messages: one JSON object per line on stdin");
    println!("  Press Ctrl+C to stop");

    daemon.run(control_rx, interaction_rx).await
}

fn check_config(config: &Config) -> Result<()> {
    info!("Validating configuration");

    config.validate()?;

    println!("Configuration validation:");
    println!("  ✓ Configuration file parsed successfully");
    println!("  ✓ Poll interval: {} ms", config.general.poll_interval_ms);
    println!("  ✓ Fire window: ±{} ms", config.general.fire_window_ms);
    println!("  ✓ App root: {}", config.display.app_root_url);

    Ok(())
}

fn test_notification(config: &Config) -> Result<()> {
    info!("Sending test notification");

    let record = AlertRecord::new(
        "test-notification".to_string(),
        "test".to_string(),
        "Reminder Notifier".to_string(),
        epoch_millis_now(),
    )
    .with_body("Notification system is working correctly!".to_string());

    let display = DesktopNotificationDisplay::new(None);
    display.show(&DisplayRequest::from_record(&record, &config.display))?;

    println!("✓ Test notification submitted");
    Ok(())
}

async fn schedule_one(config: Config, in_secs: u64, title: String, body: String) -> Result<()> {
    let alert_time = epoch_millis_now() + (in_secs as i64) * 1000;
    let record = AlertRecord::new(
        format!("cli-{alert_time}"),
        "cli".to_string(),
        title,
        alert_time,
    )
    .with_body(body);

    println!(
        "Scheduled \"{}\" in {}s, waiting for delivery...",
        record.title, in_secs
    );

    let (mut daemon, interaction_rx) = NotifierDaemon::new_desktop(config);
    daemon.seed_message(ControlMessage::SyncNotifications {
        notifications: vec![record],
    });

    // No control channel: drop the sender so only the seeded record runs.
    let (_control_tx, control_rx) = mpsc::unbounded_channel::<ControlMessage>();
    drop(_control_tx);

    daemon
        .exit_when_idle(true)
        .run(control_rx, interaction_rx)
        .await
}
