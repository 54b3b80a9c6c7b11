//! Param Guard - declarative request parameter validation
//!
//! This library checks incoming request parameter dictionaries against a
//! declarative rule set: required and optional parameters, defaults, type
//! coercion, value sets, lower bounds and one level of namespaced
//! dictionaries. Failures are reported through a precise error taxonomy.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

#[cfg(test)]
mod tests;

pub use application::ValidationService;
pub use crate::config::AppConfig;
pub use domain::validation::{
    validate, NamespacedRuleSet, ParamType, Params, Rule, RuleOptions, RuleSet, RuleSetBuilder,
    ValidationError, ValidationResult, Validator,
};
pub use infrastructure::RuleLoader;
pub use shared::error::{AppError, AppResult};

/// Application result type
pub type Result<T> = std::result::Result<T, AppError>;
