//! Request parameter validation
//!
//! Rule sets describe the expected parameters of one request shape; the
//! validator checks a parameter dictionary against them, applying defaults
//! and coercing values to their declared types.

pub mod builder;
pub mod error;
pub mod formats;
pub mod types;
pub mod validator;

pub use builder::{verify_rule_set, RuleSetBuilder};
pub use error::{ValidationError, ValidationResult};
pub use types::{NamespacedRuleSet, ParamType, Params, Rule, RuleOptions, RuleSet};
pub use self::validator::{validate, Validator};
