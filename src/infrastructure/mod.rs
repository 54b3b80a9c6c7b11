//! Infrastructure layer - External concerns and adapters
//!
//! This module contains the loaders that turn rule-set documents on disk
//! into domain rule sets.

pub mod rule_loader;

pub use rule_loader::{DocumentFormat, RuleLoader, RuleSetDocument};
