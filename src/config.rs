//! Mapper configuration.
//!
//! [`MapperConfig`] is read from the `[mapper]` table of `config/config.toml`, with
//! `ROWBIND__MAPPER__*` environment variables layered on top. Every setting has a
//! default, so a missing file or table is not an error.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::value::TIMESTAMP_LAYOUT;

const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapperConfig {
    /// `chrono` format used to parse raw timestamp columns
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    /// Lower-case column names when zipping a row into a map
    #[serde(default = "default_lowercase_columns")]
    pub lowercase_columns: bool,
}

fn default_timestamp_format() -> String {
    TIMESTAMP_LAYOUT.to_string()
}

fn default_lowercase_columns() -> bool {
    true
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            lowercase_columns: default_lowercase_columns(),
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix("ROWBIND").separator("__")
}

impl MapperConfig {
    /// Load from `config/config.toml`, falling back to env vars.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load from the TOML file at `path` (optional), falling back to env vars.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let builder = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(environment());

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                if path.exists() {
                    log::warn!(
                        "failed to load config file {}, falling back to env: {err}",
                        path.display()
                    );
                }
                Config::builder()
                    .add_source(environment())
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {err}, then env-only error: {env_err}"
                        ))
                    })?
            }
        };

        match settings.get::<MapperConfig>("mapper") {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(ConfigError::Message(format!(
                "Mapper configuration could not be loaded from file or environment: {e}"
            ))),
        }
    }
}
