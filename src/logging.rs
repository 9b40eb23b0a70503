//! Logging setup
//!
//! The TUI owns the terminal, so interactive sessions log to a daily-rolling
//! file; one-shot searches log to stderr. Filtering follows `RUST_LOG`.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_DIRECTIVE: &str = "measurements_dashboard=info";

/// Log file name prefix (the appender adds the date)
pub const LOG_FILE_PREFIX: &str = "measurements-dashboard.log";

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Keeps the non-blocking file writer alive; flushes on drop
#[derive(Debug)]
pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

/// Default directory for TUI session logs
pub fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join("measurements-dashboard")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber
pub fn init(target: &LogTarget) -> anyhow::Result<LogGuard> {
    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init()?;
            Ok(LogGuard { _guard: None })
        }
        LogTarget::File(dir) => {
            let (writer, guard) = file_writer(dir)?;
            tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()?;
            Ok(LogGuard {
                _guard: Some(guard),
            })
        }
    }
}

fn file_writer(
    dir: &Path,
) -> anyhow::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_dir_is_under_temp() {
        assert!(default_log_dir().starts_with(std::env::temp_dir()));
    }

    #[test]
    fn test_file_writer_creates_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("nested").join("logs");
        let (_writer, _guard) = file_writer(&dir).unwrap();
        assert!(dir.is_dir());
    }
}
