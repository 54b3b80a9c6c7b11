//! Parameter validation and normalization
//!
//! [`validate`] walks a [`RuleSet`] against a caller's parameter dictionary
//! and returns a normalized copy: required values checked and coerced,
//! optional defaults injected, one level of namespaced dictionaries handled
//! the same way. The first violation aborts the whole validation.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use super::error::{ValidationError, ValidationResult};
use super::formats::{check_format, coerce, is_member, numeric_value, string_form};
use super::types::{Params, Rule, RuleSet};

/// Validate `raw_params` against `rule_set`, returning the normalized copy.
///
/// Unless `ignore_unexpected` is set, top-level keys not covered by
/// [`RuleSet::param_names`] are rejected, as are undeclared keys inside a
/// namespaced dictionary. A dictionary-valued key with no matching namespace
/// is rejected regardless of `ignore_unexpected`.
pub fn validate(
    raw_params: &Params,
    rule_set: &RuleSet,
    ignore_unexpected: bool,
) -> ValidationResult<Params> {
    if !ignore_unexpected {
        reject_unexpected(raw_params, &rule_set.param_names())?;
    }

    let mut working = raw_params.clone();

    for rule in rule_set.required_rules() {
        check_required(rule, &mut working, None)?;
    }
    for rule in rule_set.optional_rules() {
        check_optional(rule, &mut working, None)?;
    }

    for namespaced in rule_set.namespaced_sets() {
        let space = Some(namespaced.space_name());
        for rule in namespaced.rules().required_rules() {
            check_required(rule, &mut working, space)?;
        }
        for rule in namespaced.rules().optional_rules() {
            check_optional(rule, &mut working, space)?;
        }
    }

    // nested shape is checked against what the caller sent, not injected defaults
    for (key, value) in raw_params {
        if let Value::Object(nested) = value {
            let namespaced = rule_set.namespace(key).ok_or_else(|| {
                ValidationError::UnexpectedParam {
                    params: vec![key.clone()],
                }
            })?;
            if !ignore_unexpected {
                reject_unexpected(nested, &namespaced.rules().param_names())?;
            }
        }
    }

    Ok(working)
}

/// Stateless entry point for callers that prefer a value to a free function
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    ignore_unexpected: bool,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tolerate undeclared scalar keys
    pub fn ignoring_unexpected(mut self, ignore: bool) -> Self {
        self.ignore_unexpected = ignore;
        self
    }

    pub fn validate(&self, raw_params: &Params, rule_set: &RuleSet) -> ValidationResult<Params> {
        validate(raw_params, rule_set, self.ignore_unexpected)
    }
}

fn reject_unexpected(params: &Params, expected: &BTreeSet<&str>) -> ValidationResult<()> {
    let unexpected: Vec<String> = params
        .keys()
        .filter(|key| !expected.contains(key.as_str()))
        .cloned()
        .collect();

    if unexpected.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::UnexpectedParam { params: unexpected })
    }
}

/// Container a rule reads from and writes to: the top level, or the nested
/// dictionary under `namespace`. A namespace key holding a non-object is
/// treated as an absent container.
fn container_mut<'a>(params: &'a mut Params, namespace: Option<&str>) -> Option<&'a mut Params> {
    match namespace {
        None => Some(params),
        Some(space) => params.get_mut(space).and_then(Value::as_object_mut),
    }
}

/// Like [`container_mut`], creating the namespace dictionary when it is missing
fn container_or_insert<'a>(
    params: &'a mut Params,
    namespace: Option<&str>,
) -> Option<&'a mut Params> {
    if let Some(space) = namespace {
        if !params.contains_key(space) {
            params.insert(space.to_string(), Value::Object(Map::new()));
        }
    }
    container_mut(params, namespace)
}

/// Present, non-null value of `name` in its container
fn extract<'a>(params: &'a Params, name: &str, namespace: Option<&str>) -> Option<&'a Value> {
    let container = match namespace {
        None => params,
        Some(space) => params.get(space)?.as_object()?,
    };
    container.get(name).filter(|value| !value.is_null())
}

fn qualified(name: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(space) => format!("{}.{}", space, name),
        None => name.to_string(),
    }
}

fn check_required(rule: &Rule, params: &mut Params, namespace: Option<&str>) -> ValidationResult<()> {
    let name = rule.name();
    let label = qualified(name, namespace);
    let options = rule.options();

    let missing = || ValidationError::MissingParam {
        name: name.to_string(),
        namespace: namespace.map(str::to_string),
    };

    let container = container_mut(params, namespace).ok_or_else(missing)?;
    let value = container.get(name).cloned().ok_or_else(missing)?;

    // an accepted null skips format and coercion but not the value constraints
    let is_null = value.is_null();
    if is_null && !options.allow_null {
        return Err(ValidationError::invalid_value(&label, "null", "value is missing"));
    }

    let declared_type = options.param_type.filter(|_| !is_null);
    if let Some(param_type) = declared_type {
        check_format(&label, &value, param_type)?;
    }

    let normalized = if let Some(allowed) = options.allowed_values() {
        let candidate = match declared_type {
            Some(param_type) => coerce(&label, &value, param_type)?,
            None => value,
        };
        if !is_member(allowed, &candidate) {
            return Err(ValidationError::invalid_value(
                &label,
                string_form(&candidate),
                "not in the allowed set of values",
            ));
        }
        candidate
    } else {
        if let Some(min) = options.min_value {
            // no numeric reading counts as zero
            let number = numeric_value(&value).unwrap_or(0.0);
            if number < min {
                return Err(ValidationError::invalid_value(
                    &label,
                    string_form(&value),
                    format!("lower than the min accepted value ({})", min),
                ));
            }
        }
        match declared_type {
            Some(param_type) => coerce(&label, &value, param_type)?,
            None => value,
        }
    };

    container.insert(name.to_string(), normalized);
    Ok(())
}

fn check_optional(rule: &Rule, params: &mut Params, namespace: Option<&str>) -> ValidationResult<()> {
    let name = rule.name();
    let label = qualified(name, namespace);
    let options = rule.options();

    let value = match extract(params, name, namespace) {
        Some(value) => value.clone(),
        None => match (&options.default, writable(params, namespace)) {
            (Some(default), true) => default.clone(),
            _ => return Ok(()),
        },
    };

    let value = match options.param_type {
        Some(param_type) => coerce(&label, &value, param_type)?,
        None => value,
    };

    if let Some(allowed) = options.allowed_values() {
        if !is_member(allowed, &value) {
            return Err(ValidationError::invalid_value(
                &label,
                string_form(&value),
                "not in the allowed set of values",
            ));
        }
    }

    if let Some(container) = container_or_insert(params, namespace) {
        container.insert(name.to_string(), value);
    }
    Ok(())
}

fn writable(params: &Params, namespace: Option<&str>) -> bool {
    match namespace.and_then(|space| params.get(space)) {
        Some(existing) => existing.is_object(),
        None => true,
    }
}
