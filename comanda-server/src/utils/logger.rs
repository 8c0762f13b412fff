//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.
//! Features:
//! - `RUST_LOG` overrides the configured level
//! - JSON console output for production
//! - Optional daily rotating log files

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, prelude::*};

/// Initialize the logging system with optional daily rotating logs
///
/// # Arguments
/// * `level` - Log level or filter directive (e.g. "info", "comanda_server=debug")
/// * `json_format` - Whether to use JSON format (true for production, false for development)
/// * `log_dir` - Optional directory for file logging (e.g., Some("./data/logs"))
///
/// # Examples
/// ```no_run
/// // Development setup (console only)
/// comanda_server::init_logger_with_file("debug", false, None)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed()
    };

    let file_layer = match log_dir {
        Some(dir) => {
            let log_dir = Path::new(dir);
            fs::create_dir_all(log_dir)?;
            // app.YYYY-MM-DD
            let app_log = RollingFileAppender::new(Rotation::DAILY, log_dir, "app");
            let layer = if json_format {
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::sync::Mutex::new(app_log))
                    .boxed()
            } else {
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(app_log))
                    .boxed()
            };
            Some(layer)
        }
        None => None,
    };

    subscriber.with(console_layer).with(file_layer).try_init()?;
    Ok(())
}
