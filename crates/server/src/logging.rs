//! # Logging
//!
//! Installs the process-wide `tracing` subscriber: one console layer on
//! stdout and one plain-text layer appending to a persistent log file.

use crate::config::AppConfig;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this more
/// than once is harmless; later calls are ignored.
pub fn init_logging(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    // A single file that is appended to across restarts.
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(&config.log_file)
        .build(&config.log_dir)?;

    let file_layer = fmt::layer().with_writer(file_appender).with_ansi(false);

    let console_layer = fmt::layer().with_writer(std::io::stdout).compact();

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    Ok(())
}
