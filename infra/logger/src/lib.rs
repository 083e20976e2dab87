//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for beacon applications.
//!
//! A [`LogConfig`] (deserializable, so it can live in the application's config
//! file) selects the level, extra filter directives, the console format and an
//! optional rolling log file written through a non-blocking worker.
//!
//! ## Example
//!
//! ```rust
//! use beacon_logger::{LogConfig, LogFormat, Logger};
//!
//! let _logger = Logger::init(&LogConfig::named("my-app").level("debug").format(LogFormat::Pretty))
//!     .unwrap();
//! tracing::info!("ready");
//! ```

mod config;
mod error;

pub use crate::config::{FileLogConfig, LogConfig, LogFormat, RotationPolicy};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use std::fs;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_SUFFIX: &str = "log";

/// A handle to the initialized logging system.
///
/// Holds the file writer's worker guard, if any; drop it only at shutdown so
/// buffered records are flushed.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Validates `config` and installs the global subscriber.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, an unknown
    ///   level, a malformed filter, `max_files == 0`, or no enabled output.
    /// * [`LoggerError::Appender`] / [`LoggerError::Internal`] when the log
    ///   directory cannot be prepared.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already set.
    pub fn init(config: &LogConfig) -> Result<Self, LoggerError> {
        validate_config(config)?;
        let env_filter = build_env_filter(config)?;

        let mut layers = Vec::new();

        if config.console {
            let console = match config.format {
                LogFormat::Compact => layer().compact().with_ansi(true).boxed(),
                LogFormat::Pretty => layer().pretty().boxed(),
                LogFormat::Json => layer().json().boxed(),
            };
            layers.push(console);
        }

        let guard = if let Some(file) = &config.file {
            fs::create_dir_all(&file.dir).map_err(|e| LoggerError::Internal {
                message: e.to_string().into(),
                context: Some(format!("Failed to create log directory: {}", file.dir.display()).into()),
            })?;

            let appender = RollingFileAppender::builder()
                .rotation(file.rotation.into())
                .filename_prefix(&config.name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(file.max_files)
                .build(&file.dir)
                .context(format!("Log directory: {}", file.dir.display()))?;

            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = layer().with_writer(writer).with_ansi(false);
            layers.push(if file.json { file_layer.json().boxed() } else { file_layer.boxed() });
            Some(guard)
        } else {
            None
        };

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Self { guard })
    }

    /// Best-effort synchronization point before shutdown; the worker flushes on drop.
    pub fn flush(&self) {
        tracing::debug!("Logger flushed");
    }

    /// Returns the file writer's worker guard, if a log file is configured.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn invalid(message: impl Into<std::borrow::Cow<'static, str>>) -> LoggerError {
    LoggerError::InvalidConfiguration { message: message.into(), context: None }
}

fn validate_config(config: &LogConfig) -> Result<(), LoggerError> {
    if config.name.trim().is_empty() {
        return Err(invalid("Logger name cannot be empty"));
    }
    if config.file.as_ref().is_some_and(|file| file.max_files == 0) {
        return Err(invalid("file.max_files must be greater than zero"));
    }
    if !config.console && config.file.is_none() {
        return Err(invalid("No logging output enabled. Enable the console or a log file."));
    }
    Ok(())
}

fn build_env_filter(config: &LogConfig) -> Result<EnvFilter, LoggerError> {
    let level = LevelFilter::from_str(&config.level)
        .map_err(|e| invalid(format!("Invalid level '{}': {e}", config.level)))?;
    let builder = EnvFilter::builder().with_default_directive(level.into());

    config.filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder
                .parse(filter)
                .map_err(|e| invalid(format!("Invalid env filter '{filter}': {e}")))
        },
    )
}
