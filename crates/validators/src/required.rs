use models::{Properties, ValidationResult};
use serde_json::Value;

use crate::validator::Validator;

/// Fails when the property is absent, null, or an empty string.
#[derive(Debug, Clone)]
pub struct Required {
    property: String,
}

pub fn required(property: impl Into<String>) -> Required {
    Required {
        property: property.into(),
    }
}

impl<T: Properties + ?Sized> Validator<T> for Required {
    fn validate(&self, instance: &T) -> ValidationResult {
        let missing = match instance.property(&self.property) {
            None | Some(Value::Null) => true,
            Some(Value::String(text)) => text.is_empty(),
            Some(_) => false,
        };

        if missing {
            ValidationResult::invalid(
                format!("{} is required", self.property),
                Some(&self.property),
            )
        } else {
            ValidationResult::valid()
        }
    }

    fn describe(&self) -> String {
        format!("required({})", self.property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Record;
    use serde_json::json;

    fn check(record: &Record) -> ValidationResult {
        required("name").validate(record)
    }

    #[test]
    fn test_absent_null_and_empty_fail() {
        for record in [
            Record::new(),
            Record::new().with("name", Value::Null),
            Record::new().with("name", ""),
        ] {
            let result = check(&record);
            assert!(!result.is_valid, "expected failure for {:?}", record);
            assert_eq!(result.message, "name is required");
            assert_eq!(result.property.as_deref(), Some("name"));
        }
    }

    #[test]
    fn test_any_non_empty_value_passes() {
        for value in [json!("Ada"), json!(" "), json!(0), json!(false), json!([])] {
            let record = Record::new().with("name", value.clone());
            assert!(check(&record).is_valid, "expected pass for {}", value);
        }
    }

    #[test]
    fn test_works_on_plain_json_values() {
        let validator = required("title");
        assert!(Validator::<Value>::validate(&validator, &json!({"title": "Intro"})).is_valid);
        assert!(!Validator::<Value>::validate(&validator, &json!({"body": "..."})).is_valid);
    }
}
