//! Domain layer - rule sets and the validation engine
//!
//! Everything here is pure and synchronous; it performs no I/O and no logging.

pub mod validation;

pub use validation::{
    validate, NamespacedRuleSet, ParamType, Params, Rule, RuleOptions, RuleSet, RuleSetBuilder,
    ValidationError, ValidationResult, Validator,
};
