//! Configuration validation module
//!
//! This module provides additional validation logic for configuration
//! beyond the basic validator crate validation.

use crate::config::app_config::{AppConfig, LoggingConfig, ValidationConfig};
use crate::shared::error::AppError;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["text", "json"];

/// Configuration validator for additional validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the complete configuration
    pub fn validate_config(config: &AppConfig) -> crate::Result<()> {
        Self::validate_logging_config(&config.logging)?;
        Self::validate_validation_config(&config.validation)?;
        Ok(())
    }

    /// Validate logging configuration
    fn validate_logging_config(logging: &LoggingConfig) -> crate::Result<()> {
        if !LOG_LEVELS.contains(&logging.level.to_ascii_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "Invalid log level: {}",
                logging.level
            )));
        }

        if !LOG_FORMATS.contains(&logging.format.as_str()) {
            return Err(AppError::Config(format!(
                "Invalid log format: {} (expected text or json)",
                logging.format
            )));
        }

        Ok(())
    }

    /// Validate rule-set related configuration
    fn validate_validation_config(validation: &ValidationConfig) -> crate::Result<()> {
        if let Some(path) = &validation.rules_path {
            let supported = [".toml", ".json"];
            if !supported.iter().any(|ext| path.ends_with(ext)) {
                return Err(AppError::Config(format!(
                    "Rules path must point to a .toml or .json document: {}",
                    path
                )));
            }
        }

        if validation.ignore_unexpected {
            tracing::warn!("Unexpected parameters will be accepted - only nested dictionaries are checked");
        }

        Ok(())
    }
}
