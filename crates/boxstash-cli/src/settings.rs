//! Layered settings
//!
//! Built-in defaults, then an optional TOML file, then `BOXSTASH_*`
//! environment variables, then command-line flags.

use std::collections::HashMap;
use std::path::Path;

use boxstash_store::StoreConfig;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::CliError;

pub const ENV_PREFIX: &str = "BOXSTASH";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub database_driver: String,
    pub database_uri: String,
    pub log_level: String,
    pub log_format: String,
    #[serde(default)]
    pub database_readers: Option<usize>,
}

/// Values given on the command line; `None` leaves the lower layers alone
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database_uri: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

impl Settings {
    /// Load settings from the process environment
    ///
    /// # Errors
    ///
    /// `Config` when the file is missing or a value has the wrong type.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self, CliError> {
        Self::load_with_env(file, None, overrides)
    }

    /// Like [`Settings::load`], reading variables from `env` instead of the process
    ///
    /// # Errors
    ///
    /// `Config` when the file is missing or a value has the wrong type.
    pub fn load_with_env(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
        overrides: &Overrides,
    ) -> Result<Self, CliError> {
        let mut builder = Config::builder()
            .set_default("database_driver", "sqlite")?
            .set_default("database_uri", "./boxstash.db")?
            .set_default("log_level", "error")?
            .set_default("log_format", "text")?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
            .set_override_option("database_uri", overrides.database_uri.clone())?
            .set_override_option("log_level", overrides.log_level.clone())?
            .set_override_option("log_format", overrides.log_format.clone())?;

        let settings: Settings = builder.build()?.try_deserialize()?;
        if !settings.database_driver.eq_ignore_ascii_case("sqlite") {
            return Err(CliError::UnsupportedDriver(settings.database_driver));
        }
        Ok(settings)
    }

    pub fn store_config(&self) -> StoreConfig {
        let config = StoreConfig::new(&self.database_uri);
        match self.database_readers {
            Some(readers) => config.with_readers(readers),
            None => config,
        }
    }
}
