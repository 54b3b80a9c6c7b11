//! Behavioural properties of the validation engine

use serde_json::{json, Value};

use crate::domain::validation::{validate, ParamType, RuleOptions, RuleSet, ValidationError};
use crate::tests::fixtures::{adult_age, params, search, user_namespace};

#[test]
fn empty_rule_set_accepts_empty_input() {
    let out = validate(&params(json!({})), &RuleSet::default(), false).unwrap();
    assert!(out.is_empty());
}

#[test]
fn every_missing_required_rule_is_reported() {
    for name in ["id", "token", "q"] {
        let rules = RuleSet::builder().required(name, RuleOptions::new()).build().unwrap();
        let err = validate(&params(json!({})), &rules, false).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingParam {
                name: name.to_string(),
                namespace: None,
            }
        );
    }
}

#[test]
fn omitted_optionals_receive_typed_defaults() {
    let out = validate(
        &params(json!({"q": "rust", "filter": {"since": "2024-01-01"}})),
        &search(),
        false,
    )
    .unwrap();

    assert_eq!(out["page"], json!(1));
    assert_eq!(out["ratio"], json!(0.5));
    assert_eq!(out["exact"], json!(false));
    assert_eq!(out["sort"], json!("asc"));
    assert!(!out.contains_key("tags"));
}

#[test]
fn validation_is_idempotent() {
    let inputs = [
        json!({"q": 42, "page": "3", "tags": "a,b", "filter": {"since": "2024-01-01T00:00", "limit": "50"}}),
        json!({"q": "x", "exact": "Y", "ratio": ".25", "filter": {"since": "2024-02-02"}}),
    ];

    for input in inputs {
        let once = validate(&params(input), &search(), false).unwrap();
        let twice = validate(&once, &search(), false).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn unexpected_keys_fail_unless_ignored() {
    let rules = RuleSet::builder().required("a", RuleOptions::new()).build().unwrap();
    let input = params(json!({"a": 1, "z": 2}));

    let err = validate(&input, &rules, false).unwrap_err();
    assert!(matches!(err, ValidationError::UnexpectedParam { .. }));
    assert!(err.to_string().contains('z'));

    let out = validate(&input, &rules, true).unwrap();
    assert_eq!(Value::Object(out), json!({"a": 1, "z": 2}));
}

#[test]
fn value_set_takes_precedence_over_min_value() {
    let rules = RuleSet::builder()
        .required("n", RuleOptions::new().options([5, 10]).min_value(1.0))
        .build()
        .unwrap();

    let err = validate(&params(json!({"n": 7})), &rules, false).unwrap_err();
    assert_eq!(err.kind(), "invalid_param_value");
    assert!(err.to_string().contains("allowed set"));

    // a member below the bound still passes since the bound is skipped
    let rules = RuleSet::builder()
        .required("n", RuleOptions::new().options([0, 5]).min_value(1.0))
        .build()
        .unwrap();
    assert!(validate(&params(json!({"n": 0})), &rules, false).is_ok());
}

#[test]
fn adult_age_scenario() {
    let err = validate(&params(json!({"age": "17"})), &adult_age(), false).unwrap_err();
    assert_eq!(err.kind(), "invalid_param_value");

    let out = validate(&params(json!({"age": "21"})), &adult_age(), false).unwrap();
    assert_eq!(Value::Object(out), json!({"age": 21}));
}

#[test]
fn user_namespace_scenario() {
    let out = validate(&params(json!({"user": {"name": "Al"}})), &user_namespace(), false).unwrap();
    assert_eq!(Value::Object(out), json!({"user": {"name": "Al"}}));

    let err = validate(&params(json!({})), &user_namespace(), false).unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingParam {
            name: "name".to_string(),
            namespace: Some("user".to_string()),
        }
    );
}

#[test]
fn undeclared_key_inside_namespace() {
    let input = params(json!({"user": {"name": "Al", "admin": true}}));

    let err = validate(&input, &user_namespace(), false).unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnexpectedParam {
            params: vec!["admin".to_string()],
        }
    );
    assert!(validate(&input, &user_namespace(), true).is_ok());
}

#[test]
fn boolean_coercion_scenario() {
    let rules = RuleSet::builder()
        .required("flag", RuleOptions::new().of_type(ParamType::Boolean))
        .optional("other", RuleOptions::new().of_type(ParamType::Boolean))
        .build()
        .unwrap();

    let out = validate(&params(json!({"flag": "T"})), &rules, false).unwrap();
    assert_eq!(out["flag"], json!(true));

    // the required check rejects the format first
    let err = validate(&params(json!({"flag": "nope"})), &rules, false).unwrap_err();
    assert_eq!(err.kind(), "invalid_param_type");

    // optional rules skip the format check, so coercion reports the bad value
    let err = validate(&params(json!({"flag": "1", "other": "nope"})), &rules, false).unwrap_err();
    assert_eq!(err.kind(), "invalid_param_value");
}

#[test]
fn first_violation_wins() {
    let rules = RuleSet::builder()
        .required("a", RuleOptions::new().of_type(ParamType::Integer))
        .required("b", RuleOptions::new())
        .build()
        .unwrap();

    // unexpected keys are reported before any rule runs
    let err = validate(&params(json!({"a": "x", "c": 1})), &rules, false).unwrap_err();
    assert_eq!(err.kind(), "unexpected_param");

    // required rules run in declaration order
    let err = validate(&params(json!({"a": "x"})), &rules, false).unwrap_err();
    assert_eq!(err.kind(), "invalid_param_type");
}

#[test]
fn input_survives_failed_validation_untouched() {
    let input = params(json!({"q": "rust", "page": "2", "filter": {"since": "bad date!"}}));
    let before = input.clone();

    assert!(validate(&input, &search(), false).is_err());
    assert_eq!(input, before);
}
