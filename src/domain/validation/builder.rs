//! Fluent construction of rule sets

use std::collections::HashSet;

use super::types::{NamespacedRuleSet, Rule, RuleOptions, RuleSet};
use crate::shared::error::{AppError, AppResult};

/// Builder for [`RuleSet`]
///
/// ```
/// use param_guard::{ParamType, RuleOptions, RuleSet};
///
/// let rules = RuleSet::builder()
///     .required("age", RuleOptions::new().of_type(ParamType::Integer).min_value(18.0))
///     .optional("newsletter", RuleOptions::new().of_type(ParamType::Boolean).default_value(false))
///     .namespace("user", |user| user.required("name", RuleOptions::new()))
///     .build()
///     .unwrap();
///
/// assert_eq!(rules.param_names().len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    required: Vec<Rule>,
    optional: Vec<Rule>,
    namespaces: Vec<NamespacedRuleSet>,
}

impl RuleSet {
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }
}

impl RuleSetBuilder {
    pub fn required(mut self, name: impl Into<String>, options: RuleOptions) -> Self {
        self.required.push(Rule::new(name, options));
        self
    }

    pub fn optional(mut self, name: impl Into<String>, options: RuleOptions) -> Self {
        self.optional.push(Rule::new(name, options));
        self
    }

    /// Declare the rules of the nested dictionary stored under `space_name`
    pub fn namespace<F>(mut self, space_name: impl Into<String>, define: F) -> Self
    where
        F: FnOnce(RuleSetBuilder) -> RuleSetBuilder,
    {
        let inner = define(RuleSetBuilder::default());
        self.namespaces
            .push(NamespacedRuleSet::new(space_name, inner.into_rule_set()));
        self
    }

    pub fn build(self) -> AppResult<RuleSet> {
        let rule_set = self.into_rule_set();
        verify_rule_set(&rule_set)?;
        Ok(rule_set)
    }

    fn into_rule_set(self) -> RuleSet {
        RuleSet::new(self.required, self.optional, self.namespaces)
    }
}

/// Check the structural invariants of a rule set: non-empty, unique names per
/// level and no namespace nested inside a namespace.
pub fn verify_rule_set(rule_set: &RuleSet) -> AppResult<()> {
    verify_level(rule_set, None)?;

    for namespaced in rule_set.namespaced_sets() {
        let space = namespaced.space_name();
        if !namespaced.rules().namespaced_sets().is_empty() {
            return Err(AppError::RuleSet(format!(
                "namespace '{}' declares nested namespaces; only one level is supported",
                space
            )));
        }
        verify_level(namespaced.rules(), Some(space))?;
    }

    Ok(())
}

fn verify_level(rule_set: &RuleSet, namespace: Option<&str>) -> AppResult<()> {
    let mut seen = HashSet::new();
    let names = rule_set
        .required_rules()
        .iter()
        .chain(rule_set.optional_rules())
        .map(Rule::name)
        .chain(rule_set.namespaced_sets().iter().map(NamespacedRuleSet::space_name));

    let scope = namespace
        .map(|space| format!(" in namespace '{}'", space))
        .unwrap_or_default();

    for name in names {
        if name.is_empty() {
            return Err(AppError::RuleSet(format!("empty parameter name{}", scope)));
        }
        if !seen.insert(name) {
            return Err(AppError::RuleSet(format!(
                "parameter '{}' is declared more than once{}",
                name, scope
            )));
        }
    }

    Ok(())
}
