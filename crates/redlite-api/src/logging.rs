//! Logging configuration for redlite
//!
//! The library only emits `tracing` events: store open/close at `info`,
//! mutations at `debug` and corrupt lists at `warn`. Applications without a
//! subscriber of their own can install one with [`LogConfig::init`].
//!
//! `RUST_LOG`, when set, takes precedence over [`LogConfig::level`].

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{Error, Result};

/// Default file name when a log path has no file component
const DEFAULT_LOG_FILE: &str = "redlite.log";

/// Log output destination
#[derive(Debug, Clone)]
pub enum LogOutput {
    /// Output to stdout
    Stdout,
    /// Output to stderr, leaving stdout to the application
    Stderr,
    /// Output to a daily rotated file
    File(PathBuf),
    /// Output to both stdout and a daily rotated file
    Both(PathBuf),
}

/// Log format style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human-readable format (default)
    Pretty,
    /// Compact single-line format
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `redlite=debug`
    pub level: String,
    /// Output destination
    pub output: LogOutput,
    /// Format style
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::with_default_level("info")
    }
}

impl LogConfig {
    fn with_default_level(level: &str) -> Self {
        Self {
            level: level.to_string(),
            output: LogOutput::Stdout,
            format: LogFormat::Pretty,
        }
    }

    /// Info level on stdout
    pub fn info() -> Self {
        Self::with_default_level("info")
    }

    /// Debug level: every push, pop and delete is reported
    pub fn debug() -> Self {
        Self::with_default_level("debug")
    }

    /// Warn level: only corruption reports
    pub fn warn() -> Self {
        Self::with_default_level("warn")
    }

    /// Send output to `output`
    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Send output to a daily rotated file
    pub fn with_file<P: Into<PathBuf>>(self, path: P) -> Self {
        self.with_output(LogOutput::File(path.into()))
    }

    /// Send output to stdout and a daily rotated file
    pub fn with_both<P: Into<PathBuf>>(self, path: P) -> Self {
        self.with_output(LogOutput::Both(path.into()))
    }

    /// Set log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the filter directive
    pub fn with_level<S: Into<String>>(mut self, level: S) -> Self {
        self.level = level.into();
        self
    }

    /// Filter built from `RUST_LOG`, then [`level`](Self::level), then `info`
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }

    /// Install this configuration as the global subscriber
    ///
    /// Returns a guard for file output that must be kept alive; dropping it
    /// flushes and stops the background writer. An unparsable level falls
    /// back to `info`. Installing twice is ignored.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use redlite::logging::LogConfig;
    ///
    /// // Keep the guard alive for the lifetime of your application
    /// let _guard = LogConfig::info().init();
    /// ```
    pub fn init(self) -> Option<WorkerGuard> {
        self.try_init().ok().flatten()
    }

    /// Like [`init`](Self::init), but reports a subscriber that is already
    /// installed as Error::InvalidArgument
    pub fn try_init(self) -> Result<Option<WorkerGuard>> {
        let filter = self.env_filter();
        let registry = tracing_subscriber::registry().with(filter);
        let compact = self.format == LogFormat::Compact;

        let (outcome, guard) = match self.output {
            LogOutput::Stdout if compact => {
                (registry.with(fmt::layer().compact()).try_init(), None)
            }
            LogOutput::Stdout => (registry.with(fmt::layer().pretty()).try_init(), None),
            LogOutput::Stderr if compact => (
                registry
                    .with(fmt::layer().with_writer(std::io::stderr).compact())
                    .try_init(),
                None,
            ),
            LogOutput::Stderr => (
                registry
                    .with(fmt::layer().with_writer(std::io::stderr).pretty())
                    .try_init(),
                None,
            ),
            LogOutput::File(path) => {
                let (writer, guard) = file_writer(&path);
                let layer = fmt::layer().with_writer(writer).with_ansi(false);
                let outcome = if compact {
                    registry.with(layer.compact()).try_init()
                } else {
                    registry.with(layer.pretty()).try_init()
                };
                (outcome, Some(guard))
            }
            LogOutput::Both(path) => {
                let (writer, guard) = file_writer(&path);
                let outcome = registry
                    .with(fmt::layer())
                    .with(fmt::layer().with_writer(writer).with_ansi(false))
                    .try_init();
                (outcome, Some(guard))
            }
        };

        outcome.map_err(|e| {
            Error::InvalidArgument(format!("logging already initialized: {}", e))
        })?;
        Ok(guard)
    }
}

fn file_writer(path: &Path) -> (NonBlocking, WorkerGuard) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_LOG_FILE);
    tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(matches!(config.output, LogOutput::Stdout));
    }

    #[test]
    fn test_log_config_builders() {
        let config = LogConfig::warn()
            .with_level("redlite=trace")
            .with_output(LogOutput::Stderr)
            .with_format(LogFormat::Compact);
        assert_eq!(config.level, "redlite=trace");
        assert!(matches!(config.output, LogOutput::Stderr));
        assert_eq!(config.format, LogFormat::Compact);

        let config = LogConfig::debug().with_file("/tmp/redlite-test.log");
        assert!(matches!(
            config.output,
            LogOutput::File(ref p) if p.ends_with("redlite-test.log")
        ));
        let config = config.with_both("logs/redlite.log");
        assert!(matches!(config.output, LogOutput::Both(_)));
    }

    #[test]
    fn test_bad_level_falls_back() {
        // A malformed directive must not panic
        let filter = LogConfig::info().with_level("[[[").env_filter();
        assert!(!filter.to_string().is_empty());
    }
}
