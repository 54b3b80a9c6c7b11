//! Shared fixtures for the validation test suite

use serde_json::Value;

use crate::domain::validation::{Params, ParamType, RuleOptions, RuleSet};

/// Turn a `json!({...})` literal into a parameter dictionary
pub fn params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        other => panic!("parameter fixture must be a JSON object, got {}", other),
    }
}

/// `age` must be an integer of at least 18
pub fn adult_age() -> RuleSet {
    RuleSet::builder()
        .required("age", RuleOptions::new().of_type(ParamType::Integer).min_value(18.0))
        .build()
        .expect("adult_age fixture is valid")
}

/// A `user` namespace with a required `name`
pub fn user_namespace() -> RuleSet {
    RuleSet::builder()
        .namespace("user", |user| user.required("name", RuleOptions::new()))
        .build()
        .expect("user_namespace fixture is valid")
}

/// A realistic search endpoint
pub fn search() -> RuleSet {
    RuleSet::builder()
        .required("q", RuleOptions::new().of_type(ParamType::String))
        .optional("page", RuleOptions::new().of_type(ParamType::Integer).default_value(1))
        .optional("ratio", RuleOptions::new().of_type(ParamType::Float).default_value("0.5"))
        .optional("exact", RuleOptions::new().of_type(ParamType::Boolean).default_value("F"))
        .optional("tags", RuleOptions::new().of_type(ParamType::Array))
        .optional("sort", RuleOptions::new().options(["asc", "desc"]).default_value("asc"))
        .namespace("filter", |filter| {
            filter
                .required("since", RuleOptions::new().of_type(ParamType::Datetime))
                .optional("limit", RuleOptions::new().of_type(ParamType::Integer).within([10, 50, 100]))
        })
        .build()
        .expect("search fixture is valid")
}

pub const SEARCH_TOML: &str = r#"
[rule_sets.search]
required = [{ name = "q", type = "string" }]
optional = [
    { name = "page", type = "integer", default = 1 },
    { name = "sort", options = ["asc", "desc"], default = "asc" },
]

[[rule_sets.search.namespaces]]
space_name = "filter"
required = [{ name = "since", type = "datetime" }]
optional = [{ name = "limit", type = "integer", in = [10, 50, 100] }]

[rule_sets.ping]
"#;
