//! # exm-config
//!
//! Layered configuration loading for Examina using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`EXAMINA_*` prefix, `__` as separator)
//! 2. Project-level `.examina/config.toml`
//! 3. User-level `~/.config/examina/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `EXAMINA_DATABASE__PATH` -> `database.path`,
//! `EXAMINA_GENERAL__ENVIRONMENT` -> `general.environment`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use exm_config::ExamConfig;
//!
//! let config = ExamConfig::load().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod database;
mod error;
mod general;

pub use database::{DEFAULT_DB_PATH, DatabaseConfig, IN_MEMORY};
pub use error::ConfigError;
pub use general::{GeneralConfig, PRODUCTION};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExamConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl ExamConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// `.env` files are not read here; callers load them before calling this.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".examina/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("EXAMINA_").split("__"))
    }

    /// Reject values figment accepts but the store cannot use.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.general.default_locale.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "general.default_locale".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("examina").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = ExamConfig::default();
        assert_eq!(config.database.path, DEFAULT_DB_PATH);
        assert_eq!(config.general.default_locale, "en");
        assert!(!config.general.is_production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_locale_is_rejected() {
        let mut config = ExamConfig::default();
        config.general.default_locale = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "general.default_locale"
        ));
    }
}
