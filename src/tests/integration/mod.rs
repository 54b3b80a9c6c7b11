//! End-to-end tests: documents on disk, configuration and the service

use std::io::Write;
use std::sync::Arc;

use serde_json::json;

use crate::{
    application::ValidationService,
    config::AppConfig,
    infrastructure::{DocumentFormat, RuleLoader},
    tests::{config, fixtures},
};

fn write_rules(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp rules file");
    file.write_all(contents.as_bytes()).expect("write rules");
    file
}

fn service_with_rules(file: &tempfile::NamedTempFile) -> ValidationService {
    let mut config = AppConfig::default();
    config.validation.rules_path = Some(file.path().display().to_string());
    ValidationService::from_config(Arc::new(config)).expect("service loads rules")
}

#[test]
fn document_rule_sets_match_builder_rule_sets() {
    let document = RuleLoader::parse(fixtures::SEARCH_TOML, DocumentFormat::Toml).unwrap();
    let loaded = &document.rule_sets["search"];

    let input = fixtures::params(json!({
        "q": "rust",
        "filter": {"since": "2024-01-01", "limit": "10"}
    }));
    let from_document = crate::validate(&input, loaded, false).unwrap();

    assert_eq!(from_document["page"], json!(1));
    assert_eq!(from_document["sort"], json!("asc"));
    assert_eq!(from_document["filter"]["limit"], json!(10));
}

#[test]
fn service_preloads_configured_document() {
    config::init();
    let file = write_rules(fixtures::SEARCH_TOML);
    let service = service_with_rules(&file);

    assert_eq!(service.names(), vec!["ping", "search"]);

    let out = service
        .validate_json("search", &json!({"q": "x", "filter": {"since": "2024-03-01"}}))
        .unwrap();
    assert_eq!(out["page"], json!(1));
}

#[test]
fn service_reports_rejections_as_error_bodies() {
    config::init();
    let file = write_rules(fixtures::SEARCH_TOML);
    let service = service_with_rules(&file);

    let err = service
        .validate_json("search", &json!({"q": "x", "filter": {"since": "2024-03-01", "limit": 7}}))
        .unwrap_err();

    assert!(err.is_rejection());
    let body = err.to_error_body();
    assert_eq!(body["error"]["kind"], "invalid_param_value");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("filter.limit"));
}

#[test]
fn empty_rule_set_from_document() {
    config::init();
    let file = write_rules(fixtures::SEARCH_TOML);
    let service = service_with_rules(&file);

    assert_eq!(service.validate_json("ping", &json!({})).unwrap(), json!({}));
    assert_eq!(
        service.validate_json("ping", &json!({"x": 1})).unwrap_err().kind(),
        "unexpected_param"
    );
}

#[test]
fn broken_document_fails_service_construction() {
    let file = write_rules("[rule_sets.bad]\nrequired = [{ name = \"a\" }, { name = \"a\" }]\n");
    let mut config = AppConfig::default();
    config.validation.rules_path = Some(file.path().display().to_string());

    let result = ValidationService::from_config(Arc::new(config));
    assert!(result.is_err());
}

#[test]
fn rule_sets_are_shared_across_threads() {
    let file = write_rules(fixtures::SEARCH_TOML);
    let service = Arc::new(service_with_rules(&file));

    let handles: Vec<_> = (0..4)
        .map(|page| {
            let service = Arc::clone(&service);
            std::thread::spawn(move || {
                service
                    .validate_json(
                        "search",
                        &json!({"q": "x", "page": page.to_string(), "filter": {"since": "2024-01-01"}}),
                    )
                    .map(|out| out["page"].clone())
            })
        })
        .collect();

    for (page, handle) in handles.into_iter().enumerate() {
        let result = handle.join().expect("worker thread");
        assert_eq!(result.unwrap(), json!(page));
    }
}
