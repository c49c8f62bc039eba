use models::{Properties, ValidationResult};
use serde_json::Value;

use crate::validator::Validator;
use crate::{as_text, present};

/// Fails unless the property equals one of the allowed values.
#[derive(Debug, Clone)]
pub struct OneOf {
    property: String,
    allowed: Vec<Value>,
}

pub fn one_of<I, V>(property: impl Into<String>, allowed: I) -> OneOf
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    OneOf {
        property: property.into(),
        allowed: allowed.into_iter().map(Into::into).collect(),
    }
}

impl OneOf {
    fn listing(&self) -> String {
        self.allowed
            .iter()
            .map(|value| as_text(value).unwrap_or_else(|| value.to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<T: Properties + ?Sized> Validator<T> for OneOf {
    fn validate(&self, instance: &T) -> ValidationResult {
        match present(instance.property(&self.property)) {
            Some(value) if !self.allowed.contains(&value) => ValidationResult::invalid(
                format!("{} must be one of: {}", self.property, self.listing()),
                Some(&self.property),
            ),
            _ => ValidationResult::valid(),
        }
    }

    fn describe(&self) -> String {
        format!("one_of({}, [{}])", self.property, self.listing())
    }
}
