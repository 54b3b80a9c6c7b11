//! Rule-set documents
//!
//! A document maps rule-set names to rule sets. TOML and JSON are supported,
//! chosen by file extension:
//!
//! ```toml
//! [rule_sets.signup]
//! required = [{ name = "age", type = "integer", minvalue = 18 }]
//! optional = [{ name = "newsletter", type = "boolean", default = false }]
//!
//! [[rule_sets.signup.namespaces]]
//! space_name = "user"
//! required = [{ name = "name", type = "string" }]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::validation::{verify_rule_set, RuleSet};
use crate::shared::error::{AppError, AppResult};

/// Named rule sets read from one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSetDocument {
    #[serde(default)]
    pub rule_sets: BTreeMap<String, RuleSet>,
}

/// Supported document encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Json,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> AppResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(DocumentFormat::Toml),
            Some("json") => Ok(DocumentFormat::Json),
            _ => Err(AppError::RuleSet(format!(
                "Unsupported rule-set document: {}",
                path.display()
            ))),
        }
    }
}

/// Loads and checks rule-set documents
pub struct RuleLoader;

impl RuleLoader {
    /// Read a document from disk, picking the parser from the extension
    pub fn load_file(path: impl AsRef<Path>) -> AppResult<RuleSetDocument> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;
        let text = fs::read_to_string(path)
            .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        debug!(path = %path.display(), ?format, "Loading rule-set document");
        Self::parse(&text, format)
    }

    /// Parse a document and check every rule set it holds
    pub fn parse(text: &str, format: DocumentFormat) -> AppResult<RuleSetDocument> {
        let document: RuleSetDocument = match format {
            DocumentFormat::Toml => toml::from_str(text)?,
            DocumentFormat::Json => serde_json::from_str(text)?,
        };

        for (name, rule_set) in &document.rule_sets {
            verify_rule_set(rule_set)
                .map_err(|e| AppError::RuleSet(format!("rule set '{}': {}", name, e)))?;
        }

        Ok(document)
    }
}
