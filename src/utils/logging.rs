//! Tracing setup.
//!
//! The terminal UI owns stdout/stderr, so the game logs to a file. The
//! simulator and console mode can log to stderr instead.

use crate::error::{AppError, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "dungeon-runner.log";

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to `<dir>/dungeon-runner.log`.
    File(PathBuf),
    Stderr,
}

/// Build the filter: `RUST_LOG` wins, otherwise `default_level`.
pub fn build_filter(default_level: &str) -> Result<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(spec) if !spec.trim().is_empty() => {
            EnvFilter::try_new(spec).map_err(|e| AppError::LogFilter(e.to_string()))
        }
        _ => EnvFilter::try_new(default_level).map_err(|e| AppError::LogFilter(e.to_string())),
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// whole program.
pub fn init_logging(target: LogTarget, default_level: &str) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(default_level)?;

    match target {
        LogTarget::File(dir) => {
            std::fs::create_dir_all(&dir)?;
            let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .try_init()
                .map_err(|e| AppError::LogInit(e.to_string()))?;
            tracing::info!(log_file = %dir.join(LOG_FILE_NAME).display(), "logging initialized");
            Ok(Some(guard))
        }
        LogTarget::Stderr => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()
                .map_err(|e| AppError::LogInit(e.to_string()))?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_plain_level() {
        if std::env::var(EnvFilter::DEFAULT_ENV).is_err() {
            assert!(build_filter("debug").is_ok());
        }
    }

    #[test]
    fn test_build_filter_rejects_garbage() {
        if std::env::var(EnvFilter::DEFAULT_ENV).is_err() {
            assert!(matches!(
                build_filter("dungeon_runner=notalevel"),
                Err(AppError::LogFilter(_))
            ));
        }
    }
}
