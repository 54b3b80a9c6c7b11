use std::fs;
use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use param_guard::{shared::LoggingUtils, AppConfig, AppError, ValidationService};
use serde_json::Value;
use tracing::{error, info};

const USAGE: &str = "usage: param-guard <rules-file> <rule-set-name> [params-file]";

fn main() -> ExitCode {
    // Load configuration
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    if let Err(e) = LoggingUtils::initialize(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(config) {
        Ok(normalized) => {
            println!("{}", normalized);
            ExitCode::SUCCESS
        }
        Err(e) => {
            match e.downcast_ref::<AppError>() {
                Some(app_error) if app_error.is_rejection() => {
                    println!("{}", app_error.to_error_body());
                }
                _ => error!("{:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(config: AppConfig) -> anyhow::Result<Value> {
    let mut args = std::env::args().skip(1);
    let (rules_path, rule_set, params_path) = match (args.next(), args.next(), args.next()) {
        (Some(rules), Some(name), params) => (rules, name, params),
        _ => bail!(USAGE),
    };

    let mut service = ValidationService::from_config(Arc::new(config))?;
    let loaded = service
        .load_document(&rules_path)
        .with_context(|| format!("loading rule sets from {}", rules_path))?;
    info!(rules = %rules_path, count = loaded, "Rule sets loaded");

    let raw = match &params_path {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading parameters from stdin")?;
            buffer
        }
    };
    let params: Value = serde_json::from_str(&raw).context("parsing parameters")?;

    Ok(service.validate_json(&rule_set, &params)?)
}
