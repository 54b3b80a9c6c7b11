use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A request parameter dictionary
pub type Params = Map<String, Value>;

/// Declared parameter types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Integer,
    Float,
    Decimal,
    String,
    Boolean,
    Datetime,
    Array,
    Binary,
    File,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::Integer => "integer",
            ParamType::Float => "float",
            ParamType::Decimal => "decimal",
            ParamType::String => "string",
            ParamType::Boolean => "boolean",
            ParamType::Datetime => "datetime",
            ParamType::Array => "array",
            ParamType::Binary => "binary",
            ParamType::File => "file",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options attached to a single parameter rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleOptions {
    /// Declared type, drives the format check and coercion
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<ParamType>,

    /// Whether an explicit null is accepted
    #[serde(rename = "null", default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_null: bool,

    /// Value injected when an optional parameter is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Allowed (coerced) values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Value>>,

    /// Synonym of `options`, consulted only when `options` is unset
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub within: Option<Vec<Value>>,

    /// Numeric lower bound, ignored when a value set is declared
    #[serde(rename = "minvalue", default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
}

impl RuleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of_type(mut self, param_type: ParamType) -> Self {
        self.param_type = Some(param_type);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.allow_null = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn options<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.options = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn within<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.within = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn min_value(mut self, min: f64) -> Self {
        self.min_value = Some(min);
        self
    }

    /// The effective value-set constraint (`options` wins over `in`)
    pub fn allowed_values(&self) -> Option<&[Value]> {
        self.options.as_deref().or(self.within.as_deref())
    }
}

/// A named constraint describing one expected parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    name: String,
    #[serde(flatten)]
    options: RuleOptions,
}

impl Rule {
    pub fn new(name: impl Into<String>, options: RuleOptions) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &RuleOptions {
        &self.options
    }
}

/// The required, optional and namespaced rules for one request shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(rename = "required", default, skip_serializing_if = "Vec::is_empty")]
    required_rules: Vec<Rule>,

    #[serde(rename = "optional", default, skip_serializing_if = "Vec::is_empty")]
    optional_rules: Vec<Rule>,

    #[serde(rename = "namespaces", default, skip_serializing_if = "Vec::is_empty")]
    namespaced_sets: Vec<NamespacedRuleSet>,
}

impl RuleSet {
    pub fn new(
        required_rules: Vec<Rule>,
        optional_rules: Vec<Rule>,
        namespaced_sets: Vec<NamespacedRuleSet>,
    ) -> Self {
        Self {
            required_rules,
            optional_rules,
            namespaced_sets,
        }
    }

    pub fn required_rules(&self) -> &[Rule] {
        &self.required_rules
    }

    pub fn optional_rules(&self) -> &[Rule] {
        &self.optional_rules
    }

    pub fn namespaced_sets(&self) -> &[NamespacedRuleSet] {
        &self.namespaced_sets
    }

    /// Top-level names covered by this set: required, optional and namespace keys
    pub fn param_names(&self) -> BTreeSet<&str> {
        self.required_rules
            .iter()
            .chain(&self.optional_rules)
            .map(Rule::name)
            .chain(self.namespaced_sets.iter().map(NamespacedRuleSet::space_name))
            .collect()
    }

    /// Find the namespaced set governing `space_name`
    pub fn namespace(&self, space_name: &str) -> Option<&NamespacedRuleSet> {
        self.namespaced_sets
            .iter()
            .find(|set| set.space_name == space_name)
    }

    /// True when nothing at all is declared
    pub fn is_empty(&self) -> bool {
        self.required_rules.is_empty()
            && self.optional_rules.is_empty()
            && self.namespaced_sets.is_empty()
    }
}

/// A rule set governing the nested dictionary stored under `space_name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespacedRuleSet {
    space_name: String,
    #[serde(flatten)]
    rules: RuleSet,
}

impl NamespacedRuleSet {
    pub fn new(space_name: impl Into<String>, rules: RuleSet) -> Self {
        Self {
            space_name: space_name.into(),
            rules,
        }
    }

    pub fn space_name(&self) -> &str {
        &self.space_name
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}
