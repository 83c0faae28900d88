//! Logging configuration using tracing
//!
//! The terminal belongs to the UI, so logs only ever go to a file.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE: &str = "kube-tutor.log";

/// Initialize the logging subsystem
///
/// Logs are written to `<data dir>/kube-tutor/logs/`.
/// Log level is controlled by the `KUBE_TUTOR_LOG` environment variable.
///
/// # Examples
/// ```bash
/// KUBE_TUTOR_LOG=debug kube-tutor
/// KUBE_TUTOR_LOG=kube_tutor::diagram=trace kube-tutor
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE);

    let env_filter = EnvFilter::try_from_env("KUBE_TUTOR_LOG")
        .unwrap_or_else(|_| EnvFilter::new("kube_tutor=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("kube-tutor {} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Route panics into the log and restore the terminal when the UI thread dies
///
/// Worker threads (diagram renders) catch their own panics, so only the
/// main thread tears the terminal down.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let thread = std::thread::current();
        let name = thread.name().unwrap_or("<unnamed>");
        tracing::error!("Panic on thread '{}': {}", name, panic_info);

        if name == "main" {
            crate::tui::restore_terminal();
            original_hook(panic_info);
        }
    }));
}

/// Directory holding the rolling log files
pub fn log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("kube-tutor").join("logs")
}
