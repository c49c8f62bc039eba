use models::ValidationResult;
use serde_json::Value;

use crate::present;

/// A single rule evaluated against an instance.
///
/// Validators must not panic: the only way to report a problem is an
/// invalid [`ValidationResult`].
pub trait Validator<T: ?Sized>: Send + Sync {
    fn validate(&self, instance: &T) -> ValidationResult;

    /// Short label used when listing registered validators.
    fn describe(&self) -> String {
        "custom".to_string()
    }
}

impl<T, F> Validator<T> for F
where
    T: ?Sized,
    F: Fn(&T) -> ValidationResult + Send + Sync,
{
    fn validate(&self, instance: &T) -> ValidationResult {
        self(instance)
    }
}

/// Named validator built from a predicate over one property.
///
/// The predicate sees `None` for absent or null properties.
pub struct Custom<F> {
    property: String,
    message: String,
    predicate: F,
}

pub fn custom<F>(property: impl Into<String>, message: impl Into<String>, predicate: F) -> Custom<F>
where
    F: Fn(Option<&Value>) -> bool + Send + Sync,
{
    Custom {
        property: property.into(),
        message: message.into(),
        predicate,
    }
}

impl<T, F> Validator<T> for Custom<F>
where
    T: models::Properties + ?Sized,
    F: Fn(Option<&Value>) -> bool + Send + Sync,
{
    fn validate(&self, instance: &T) -> ValidationResult {
        let value = present(instance.property(&self.property));
        if (self.predicate)(value.as_ref()) {
            ValidationResult::valid()
        } else {
            ValidationResult::invalid(self.message.clone(), Some(&self.property))
        }
    }

    fn describe(&self) -> String {
        format!("custom({})", self.property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Record;

    #[test]
    fn test_closure_is_a_validator() {
        let not_admin = |record: &Record| {
            if record.get("role") == Some(&Value::from("admin")) {
                ValidationResult::invalid("admins cannot self-register", Some("role"))
            } else {
                ValidationResult::valid()
            }
        };

        let record = Record::new().with("role", "admin");
        let result = not_admin.validate(&record);

        assert!(!result.is_valid);
        assert_eq!(result.property.as_deref(), Some("role"));
    }

    #[test]
    fn test_custom_sees_none_for_null() {
        let even = custom("count", "count must be even", |value: Option<&Value>| {
            value
                .and_then(Value::as_i64)
                .map(|count| count % 2 == 0)
                .unwrap_or(true)
        });

        assert!(even.validate(&Record::new().with("count", Value::Null)).is_valid);
        assert!(even.validate(&Record::new().with("count", 4)).is_valid);

        let result = even.validate(&Record::new().with("count", 3));
        assert!(!result.is_valid);
        assert_eq!(result.message, "count must be even");
    }
}
