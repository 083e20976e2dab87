use beacon_emitter::EmitterConfig;
use beacon_logger::LogConfig;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::Path;

/// Config file looked up in the working directory when no path is given (any
/// extension the `config` crate understands, e.g. `beacon.toml`).
pub const DEFAULT_CONFIG_FILE: &str = "beacon";
/// Prefix of environment overrides, e.g. `BEACON__LOG__LEVEL=debug`.
pub const ENV_PREFIX: &str = "BEACON";

#[beacon_derive::beacon_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: ::config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Everything the demo binary can be configured with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub emitter: EmitterConfig,
    pub log: LogConfig,
}

/// Loads [`DemoConfig`] from defaults, a TOML file and the environment.
///
/// With `path == None` the [`DEFAULT_CONFIG_FILE`] is optional; an explicit
/// path must exist.
///
/// # Errors
/// Returns [`ConfigError::Config`] when the file is missing (explicit path
/// only), malformed, or does not match [`DemoConfig`].
pub fn load_config(path: Option<&Path>) -> Result<DemoConfig, ConfigError> {
    let file = path.map_or_else(
        || ::config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        |path| ::config::File::from(path).required(true),
    );

    let config = ::config::Config::builder()
        .add_source(file)
        .add_source(::config::Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true))
        .build()
        .context("Failed to build config")?
        .try_deserialize::<DemoConfig>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
