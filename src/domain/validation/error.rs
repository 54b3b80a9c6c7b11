//! Validation failure taxonomy

use thiserror::Error;

use super::types::ParamType;

/// Every way a parameter dictionary can fail validation.
///
/// Validation is fail-fast: the first violation aborts and is returned as one
/// of these variants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Request included unexpected parameter(s): {}", .params.join(", "))]
    UnexpectedParam { params: Vec<String> },

    #[error("'{name}' is missing{}", in_namespace(.namespace))]
    MissingParam {
        name: String,
        namespace: Option<String>,
    },

    #[error("Value for parameter '{name}' ({value}) is not a valid {expected}")]
    InvalidParamType {
        name: String,
        value: String,
        expected: ParamType,
    },

    #[error("Value for parameter '{name}' ({value}) is invalid: {reason}")]
    InvalidParamValue {
        name: String,
        value: String,
        reason: String,
    },

    #[error("No parameters are defined for this request")]
    NoParamsDefined,
}

fn in_namespace(namespace: &Option<String>) -> String {
    namespace
        .as_deref()
        .map(|space| format!(" from '{}'", space))
        .unwrap_or_default()
}

impl ValidationError {
    pub(crate) fn invalid_value(
        name: &str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ValidationError::InvalidParamValue {
            name: name.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Stable snake-case code for the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::UnexpectedParam { .. } => "unexpected_param",
            ValidationError::MissingParam { .. } => "missing_param",
            ValidationError::InvalidParamType { .. } => "invalid_param_type",
            ValidationError::InvalidParamValue { .. } => "invalid_param_value",
            ValidationError::NoParamsDefined => "no_params_defined",
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;
