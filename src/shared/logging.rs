//! Logging utilities module
//!
//! This module provides centralized logging functionality and utilities.

use tracing::{debug, info, warn};

use crate::config::app_config::LoggingConfig;
use crate::shared::error::AppError;

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified configuration
    pub fn initialize(config: &LoggingConfig) -> crate::Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.level));

        let builder = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(false);

        let result = if config.format == "json" {
            tracing::subscriber::set_global_default(
                builder
                    .json()
                    .with_current_span(config.structured)
                    .finish(),
            )
        } else {
            tracing::subscriber::set_global_default(
                builder
                    .with_file(config.structured)
                    .with_line_number(config.structured)
                    .finish(),
            )
        };

        result.map_err(|e| AppError::Internal(format!("Failed to initialize logging: {}", e)))
    }

    /// Log a rule set added to the catalog
    pub fn log_rule_set_loaded(name: &str, required: usize, optional: usize, namespaces: usize) {
        debug!(
            rule_set = %name,
            required = required,
            optional = optional,
            namespaces = namespaces,
            "Rule set registered"
        );
    }

    /// Log a successful validation
    pub fn log_validation_success(rule_set: &str, param_count: usize, duration_us: u128) {
        info!(
            rule_set = %rule_set,
            params = param_count,
            duration_us = %duration_us,
            "Parameters validated"
        );
    }

    /// Log a rejected or failed validation
    pub fn log_validation_failure(rule_set: &str, error: &AppError, duration_us: u128) {
        warn!(
            rule_set = %rule_set,
            kind = error.kind(),
            error = %error,
            duration_us = %duration_us,
            "Parameter validation failed"
        );
    }
}
