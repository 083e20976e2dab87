use serde::Deserialize;
use std::path::PathBuf;
use tracing_appender::rolling::Rotation;

const DEFAULT_NAME: &str = "beacon";
const DEFAULT_LEVEL: &str = "info";
const DEFAULT_MAX_FILES: usize = 10;

/// Logging settings, usually embedded in an application's own config file.
///
/// ```toml
/// [log]
/// level = "debug"
/// filter = "beacon_emitter=trace"
/// format = "pretty"
///
/// [log.file]
/// dir = "logs"
/// rotation = "hourly"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Application name; also the prefix of rolled log files.
    pub name: String,
    /// Default level directive (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    pub level: String,
    /// Extra directives such as `beacon_emitter=trace`. `RUST_LOG` is used when absent.
    pub filter: Option<String>,
    pub console: bool,
    pub format: LogFormat,
    pub file: Option<FileLogConfig>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            level: DEFAULT_LEVEL.to_owned(),
            filter: None,
            console: true,
            format: LogFormat::Compact,
            file: None,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    #[must_use]
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    #[must_use]
    pub const fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn file(mut self, file: FileLogConfig) -> Self {
        self.file = Some(file);
        self
    }
}

/// Console output style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Rolling file output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileLogConfig {
    pub dir: PathBuf,
    pub rotation: RotationPolicy,
    /// Number of rolled files kept on disk; must be non-zero.
    pub max_files: usize,
    pub json: bool,
}

impl Default for FileLogConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            rotation: RotationPolicy::Daily,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        }
    }
}

impl FileLogConfig {
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), ..Self::default() }
    }
}

/// Deserializable mirror of [`Rotation`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

impl From<RotationPolicy> for Rotation {
    fn from(policy: RotationPolicy) -> Self {
        match policy {
            RotationPolicy::Minutely => Self::MINUTELY,
            RotationPolicy::Hourly => Self::HOURLY,
            RotationPolicy::Daily => Self::DAILY,
            RotationPolicy::Never => Self::NEVER,
        }
    }
}
