use indexmap::IndexMap;
use lazy_static::lazy_static;
use models::Record;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use validators::{length, one_of, pattern, required, PatternError, Registry};

use crate::schema::SchemaValidator;

lazy_static! {
    static ref PROPERTY_NAME: Regex =
        Regex::new(r"^[^\s]+$").expect("Failed to compile property name regex");
}

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Failed to read rule file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in rule file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Rule file does not match the schema:\n{}", bullet_list(.0))]
    Schema(Vec<String>),

    #[error("Schema error: {0}")]
    SchemaSetup(String),

    #[error("Malformed rule file: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("Target '{target}', rule {index}: {source}")]
    Pattern {
        target: String,
        index: usize,
        #[source]
        source: PatternError,
    },

    #[error("Target '{target}', rule {index}: invalid property name '{property}'")]
    PropertyName {
        target: String,
        index: usize,
        property: String,
    },

    #[error("Target '{target}', rule {index}: length bounds {min}..{max} can never be met")]
    Bounds {
        target: String,
        index: usize,
        min: usize,
        max: usize,
    },
}

fn bullet_list(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| format!("- {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One declared validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    Required {
        property: String,
    },
    Pattern {
        property: String,
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flags: Option<String>,
    },
    Length {
        property: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
    },
    OneOf {
        property: String,
        values: Vec<Value>,
    },
}

impl Rule {
    pub fn property(&self) -> &str {
        match self {
            Rule::Required { property }
            | Rule::Pattern { property, .. }
            | Rule::Length { property, .. }
            | Rule::OneOf { property, .. } => property,
        }
    }
}

/// Validators declared per target, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub targets: IndexMap<String, Vec<Rule>>,
}

impl RuleSet {
    /// The only target, if exactly one is declared.
    pub fn sole_target(&self) -> Option<&str> {
        if self.targets.len() == 1 {
            self.targets.keys().next().map(String::as_str)
        } else {
            None
        }
    }

    /// Compiles every rule, in declaration order, into a registry of validators.
    pub fn build_registry(&self) -> Result<Registry<Record>, RuleError> {
        let mut registry = Registry::new();

        for (target, rules) in &self.targets {
            for (i, rule) in rules.iter().enumerate() {
                let index = i + 1;
                if !PROPERTY_NAME.is_match(rule.property()) {
                    return Err(RuleError::PropertyName {
                        target: target.clone(),
                        index,
                        property: rule.property().to_string(),
                    });
                }

                match rule {
                    Rule::Required { property } => {
                        registry.register_validator(target, required(property.as_str()));
                    }
                    Rule::Pattern {
                        property,
                        pattern: expression,
                        flags,
                    } => {
                        let validator = pattern(property.as_str(), expression, flags.as_deref())
                            .map_err(|source| RuleError::Pattern {
                                target: target.clone(),
                                index,
                                source,
                            })?;
                        registry.register_validator(target, validator);
                    }
                    Rule::Length { property, min, max } => {
                        if let (Some(min), Some(max)) = (min, max) {
                            if min > max {
                                return Err(RuleError::Bounds {
                                    target: target.clone(),
                                    index,
                                    min: *min,
                                    max: *max,
                                });
                            }
                        }
                        registry.register_validator(target, length(property.as_str(), *min, *max));
                    }
                    Rule::OneOf { property, values } => {
                        registry
                            .register_validator(target, one_of(property.as_str(), values.clone()));
                    }
                }
            }
        }

        Ok(registry)
    }
}

/// Parses rule file content (YAML, or JSON which YAML accepts).
pub fn parse_rules(content: &str) -> Result<RuleSet, RuleError> {
    let raw: Value = serde_yaml::from_str(content)?;

    let schema = SchemaValidator::new().map_err(RuleError::SchemaSetup)?;
    schema.validate_rules(&raw).map_err(RuleError::Schema)?;

    let rules: RuleSet = serde_json::from_value(raw)?;
    logging::debug(&format!(
        "Parsed rule file with {} target(s)",
        rules.targets.len()
    ));
    Ok(rules)
}

pub fn load_rules(path: &Path) -> Result<RuleSet, RuleError> {
    let content = fs::read_to_string(path).map_err(|source| RuleError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    logging::info(&format!("Loading rules from {}", path.display()));
    parse_rules(&content)
}
