//! # klara-config
//!
//! Layered configuration loading for klara using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`KLARA_*` prefix, `__` as separator)
//! 2. Project-level `.klara/config.toml`
//! 3. User-level `~/.config/klara/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `KLARA_MODEL__HOST` -> `model.host`,
//! `KLARA_OUTPUT__TEST_RUNNER` -> `output.test_runner`, etc.
//!
//! ```no_run
//! use klara_config::KlaraConfig;
//!
//! let config = KlaraConfig::load_with_dotenv().expect("config");
//! println!("model: {} at {}", config.model.name, config.model.base_url());
//! ```

mod error;
mod model;
mod output;
mod search;

pub use error::ConfigError;
pub use model::ModelConfig;
pub use output::OutputConfig;
pub use search::SearchConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "KLARA_";

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".klara/config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct KlaraConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl KlaraConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory, then [`Self::load`].
    ///
    /// # Errors
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(PROJECT_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("klara").join("config.toml"))
    }

    /// Reject values that would only fail later, mid-generation.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let host = self.model.host.as_str();
        if !(host.starts_with("http://") || host.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "model.host",
                format!("expected an http(s) URL, got '{host}'"),
            ));
        }
        if self.model.name.trim().is_empty() {
            return Err(ConfigError::invalid("model.name", "must not be empty"));
        }
        if self.model.timeout_secs == 0 {
            return Err(ConfigError::invalid("model.timeout_secs", "must be positive"));
        }
        if self.output.tests_dir.trim().is_empty() {
            return Err(ConfigError::invalid("output.tests_dir", "must not be empty"));
        }
        if self.output.test_runner.trim().is_empty() {
            return Err(ConfigError::invalid("output.test_runner", "must not be empty"));
        }
        Ok(())
    }
}
