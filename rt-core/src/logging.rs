//! Structured logging setup using the `tracing` ecosystem.
//!
//! Console output always; an optional daily-rotated log file in either
//! human-readable or JSON format.

use std::path::Path;

use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::RtResult;

/// Initialize the global tracing subscriber with console and file output.
///
/// # Arguments
/// * `level` - Filter directive: "trace", "debug", "info", "warn", "error",
///   or a full `EnvFilter` string such as "rt_api=debug"
/// * `log_dir` - Directory for log files
/// * `json_output` - If true, use JSON format for file output
pub fn init_logging(level: &str, log_dir: &Path, json_output: bool) -> RtResult<LogGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = rolling::daily(log_dir, "rutube.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    if json_output {
        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install subscriber: {e}"))?;
    } else {
        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install subscriber: {e}"))?;
    }

    tracing::info!("logging initialized at level={level}, dir={}", log_dir.display());

    Ok(LogGuard { _guard: guard })
}

/// Guard that keeps the non-blocking log writer alive.
/// Drop this to flush and close the log file.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Initialize a console-only logger for tests or simple CLI usage.
/// Subsequent calls are no-ops.
pub fn init_console_logging(level: &str) {
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true).compact())
        .try_init();
}
