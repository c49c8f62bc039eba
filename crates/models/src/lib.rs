use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Outcome of evaluating one validator against one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        ValidationResult {
            is_valid: true,
            message: String::new(),
            property: None,
        }
    }

    pub fn invalid(message: impl Into<String>, property: Option<&str>) -> Self {
        ValidationResult {
            is_valid: false,
            message: message.into(),
            property: property.map(str::to_string),
        }
    }
}

impl ValidationResult {
    /// Whether the message already opens with the property name, as in
    /// `"name is required"`.
    fn names_property(&self, property: &str) -> bool {
        self.message
            .strip_prefix(property)
            .map(|rest| rest.starts_with(' '))
            .unwrap_or(false)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property {
            Some(property) if !self.names_property(property) => {
                write!(f, "{}: {}", property, self.message)
            }
            _ => write!(f, "{}", self.message),
        }
    }
}

/// Failures collected over a whole document (many instances).
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub issues: Vec<ValidationResult>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationReport {
    pub fn new() -> Self {
        ValidationReport {
            is_valid: true,
            issues: Vec::new(),
        }
    }

    pub fn add_issue(&mut self, issue: ValidationResult) {
        self.is_valid = false;
        self.issues.push(issue);
    }

    pub fn extend<I>(&mut self, issues: I)
    where
        I: IntoIterator<Item = ValidationResult>,
    {
        for issue in issues {
            self.add_issue(issue);
        }
    }
}

/// Read access to named properties of an instance.
///
/// `None` means the property is absent, `Some(Value::Null)` means it is
/// present but null. Built-in validators treat both as "no value".
pub trait Properties {
    fn property(&self, name: &str) -> Option<Value>;
}

impl Properties for Value {
    fn property(&self, name: &str) -> Option<Value> {
        self.as_object().and_then(|object| object.get(name).cloned())
    }
}

impl Properties for Map<String, Value> {
    fn property(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl<T: Properties + ?Sized> Properties for &T {
    fn property(&self, name: &str) -> Option<Value> {
        (**self).property(name)
    }
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("expected an object, found {0}")]
    NotAnObject(&'static str),
}

/// A dynamic instance: properties in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        match value {
            Value::Object(object) => Ok(Record {
                fields: object.into_iter().collect(),
            }),
            other => Err(RecordError::NotAnObject(kind_of(&other))),
        }
    }
}

impl Properties for Record {
    fn property(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }
}

/// Human-readable JSON kind, used in error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_flips_on_first_issue() {
        let mut report = ValidationReport::new();
        assert!(report.is_valid);

        report.add_issue(ValidationResult::invalid("name is required", Some("name")));
        assert!(!report.is_valid);
        assert_eq!(report.issues.len(), 1);
    }

    #[test]
    fn test_record_distinguishes_absent_and_null() {
        let record = Record::new().with("name", Value::Null);

        assert_eq!(record.property("name"), Some(Value::Null));
        assert_eq!(record.property("email"), None);
    }

    #[test]
    fn test_record_deserialize_keeps_field_order() {
        let record: Record = serde_json::from_str(r#"{"b": 1, "a": 2}"#).unwrap();
        let names: Vec<&str> = record.iter().map(|(name, _)| name.as_str()).collect();

        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(record.get("a"), Some(&json!(2)));
    }

    #[test]
    fn test_record_from_non_object_fails() {
        let err = Record::from_value(json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "expected an object, found an array");
    }

    #[test]
    fn test_display_prefixes_property_unless_message_starts_with_it() {
        let named = ValidationResult::invalid("name is required", Some("name"));
        assert_eq!(named.to_string(), "name is required");

        let bare = ValidationResult::invalid("too short", Some("title"));
        assert_eq!(bare.to_string(), "title: too short");
    }

    #[test]
    fn test_display_short_property_inside_message_still_prefixed() {
        let short = ValidationResult::invalid("value must be a valid address", Some("e"));
        assert_eq!(short.to_string(), "e: value must be a valid address");

        let longer_name = ValidationResult::invalid("email is required", Some("e"));
        assert_eq!(longer_name.to_string(), "e: email is required");
    }
}
