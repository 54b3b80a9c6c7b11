//! Application configuration structures
//!
//! This module contains the main configuration structures for the application.

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::validation::ConfigValidator;
use crate::shared::error::AppError;

/// Environment variable prefix, e.g. `PARAM_GUARD__LOGGING__LEVEL=debug`
const ENV_PREFIX: &str = "PARAM_GUARD";

/// Default configuration file name (any extension the `config` crate knows)
const CONFIG_FILE: &str = "ParamGuard";

/// Validation behaviour configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ValidationConfig {
    /// Accept top-level keys no rule declares
    pub ignore_unexpected: bool,

    /// Rule-set document to preload
    #[validate(length(min = 1))]
    pub rules_path: Option<String>,

    /// Reject validation against a rule set that declares nothing
    pub require_declared_rules: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(length(min = 1))]
    pub level: String,

    /// Log format (json, text)
    pub format: String,

    /// Include source locations / span context
    pub structured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            structured: false,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    /// Validation behaviour
    #[validate(nested)]
    pub validation: ValidationConfig,

    /// Logging configuration
    #[validate(nested)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the optional default file and environment variables
    pub fn load() -> crate::Result<Self> {
        Self::build(config::File::with_name(CONFIG_FILE).required(false))
    }

    /// Load configuration from an explicit file, still honouring environment overrides
    pub fn load_from(path: impl AsRef<Path>) -> crate::Result<Self> {
        Self::build(config::File::from(path.as_ref()).required(true))
    }

    fn build<S>(file: S) -> crate::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;

        config
            .validate()
            .map_err(|e| AppError::Config(format!("Configuration validation failed: {}", e)))?;
        ConfigValidator::validate_config(&config)?;

        Ok(config)
    }
}
