//! Logging setup: stderr console output plus an optional rolling log file.

use crate::config::{paths, LoggingConfig};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize logging with console and optional file output.
///
/// `RUST_LOG` takes precedence over the configured level. When file logging
/// is on, logs are written to:
/// - macOS: ~/Library/Application Support/huepick/logs/
/// - Windows: %APPDATA%\huepick\logs\
/// - Linux: ~/.config/huepick/logs/
pub fn setup(config: &LoggingConfig) {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
    };

    // Console layer on stderr; stdout carries pick results
    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(filter());

    let file_layer = if config.file {
        let log_dir = paths::log_dir();

        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            eprintln!(
                "Warning: Failed to create log directory {:?}: {}",
                log_dir, e
            );
            None
        } else {
            let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "huepick.log");

            Some(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false) // No ANSI colors in file output
                    .with_writer(file_appender)
                    .with_filter(filter()),
            )
        }
    } else {
        None
    };

    let registry = tracing_subscriber::registry().with(console_layer);
    let result = match file_layer {
        Some(file_layer) => registry.with(file_layer).try_init(),
        None => registry.try_init(),
    };
    if let Err(e) = result {
        eprintln!("Warning: logging already initialized: {e}");
        return;
    }

    if config.file {
        tracing::info!("File logging enabled: {:?}", paths::log_dir());
    }
    tracing::debug!("Logging initialized (level={})", config.level);
}
