//! Error handling module
//!
//! This module provides centralized error handling for the application.

use serde_json::Value;
use thiserror::Error;

use crate::domain::validation::ValidationError;

/// Application error types
#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Rule set error: {0}")]
    RuleSet(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON serialization error: {0}")]
    Json(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short code identifying the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::Validation(err) => err.kind(),
            AppError::RuleSet(_) => "rule_set_error",
            AppError::Io(_) => "io_error",
            AppError::Json(_) => "json_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Whether the failure was caused by the request parameters themselves
    pub fn is_rejection(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    /// Convert to a JSON rejection body
    pub fn to_error_body(&self) -> Value {
        serde_json::json!({
            "error": {
                "kind": self.kind(),
                "message": self.to_string()
            }
        })
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::RuleSet(err.to_string())
    }
}
