//! Validation service that orchestrates rule-set lookup and validation

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::{
    config::AppConfig,
    domain::validation::{validate, verify_rule_set, Params, RuleSet, ValidationError},
    infrastructure::rule_loader::RuleLoader,
    shared::{
        error::{AppError, AppResult},
        logging::LoggingUtils,
    },
};

/// Catalog of named rule sets plus the configured validation behaviour
pub struct ValidationService {
    config: Arc<AppConfig>,
    rule_sets: HashMap<String, Arc<RuleSet>>,
}

impl ValidationService {
    /// Create an empty service
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            rule_sets: HashMap::new(),
        }
    }

    /// Create a service and preload the configured rules document, if any
    pub fn from_config(config: Arc<AppConfig>) -> AppResult<Self> {
        let rules_path = config.validation.rules_path.clone();
        let mut service = Self::new(config);
        if let Some(path) = rules_path {
            service.load_document(path)?;
        }
        Ok(service)
    }

    /// Register a rule set under `name`, replacing any previous one
    pub fn register(&mut self, name: impl Into<String>, rule_set: RuleSet) -> AppResult<()> {
        verify_rule_set(&rule_set)?;
        let name = name.into();
        LoggingUtils::log_rule_set_loaded(
            &name,
            rule_set.required_rules().len(),
            rule_set.optional_rules().len(),
            rule_set.namespaced_sets().len(),
        );
        self.rule_sets.insert(name, Arc::new(rule_set));
        Ok(())
    }

    /// Register every rule set of a document; returns how many were added
    pub fn load_document(&mut self, path: impl AsRef<Path>) -> AppResult<usize> {
        let document = RuleLoader::load_file(path)?;
        let count = document.rule_sets.len();
        for (name, rule_set) in document.rule_sets {
            self.register(name, rule_set)?;
        }
        Ok(count)
    }

    /// Get a rule set by name
    pub fn get(&self, name: &str) -> Option<Arc<RuleSet>> {
        self.rule_sets.get(name).cloned()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rule_sets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Validate with the configured `ignore_unexpected` setting
    pub fn validate(&self, name: &str, params: &Params) -> AppResult<Params> {
        self.validate_with(name, params, self.config.validation.ignore_unexpected)
    }

    /// Validate with an explicit `ignore_unexpected` flag
    pub fn validate_with(
        &self,
        name: &str,
        params: &Params,
        ignore_unexpected: bool,
    ) -> AppResult<Params> {
        let started = Instant::now();
        let result = self.run(name, params, ignore_unexpected);
        let elapsed = started.elapsed().as_micros();

        match &result {
            Ok(normalized) => LoggingUtils::log_validation_success(name, normalized.len(), elapsed),
            Err(e) => LoggingUtils::log_validation_failure(name, e, elapsed),
        }

        result
    }

    /// Validate a JSON document, which must be an object
    pub fn validate_json(&self, name: &str, params: &Value) -> AppResult<Value> {
        let params = params
            .as_object()
            .ok_or_else(|| AppError::Json("request parameters must be a JSON object".to_string()))?;
        self.validate(name, params).map(Value::Object)
    }

    fn run(&self, name: &str, params: &Params, ignore_unexpected: bool) -> AppResult<Params> {
        let rule_set = self
            .rule_sets
            .get(name)
            .ok_or_else(|| AppError::RuleSet(format!("Unknown rule set: {}", name)))?;

        if self.config.validation.require_declared_rules && rule_set.is_empty() {
            return Err(ValidationError::NoParamsDefined.into());
        }

        Ok(validate(params, rule_set, ignore_unexpected)?)
    }
}
