use models::{Properties, ValidationResult};
use serde_json::Value;

use crate::present;
use crate::validator::Validator;

/// Bounds the length of a text (in characters) or a list (in items).
#[derive(Debug, Clone)]
pub struct Length {
    property: String,
    min: Option<usize>,
    max: Option<usize>,
}

pub fn length(property: impl Into<String>, min: Option<usize>, max: Option<usize>) -> Length {
    Length {
        property: property.into(),
        min,
        max,
    }
}

fn count(n: usize, unit: &str) -> String {
    if n == 1 {
        format!("{} {}", n, unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

impl Length {
    fn fail(&self, message: String) -> ValidationResult {
        ValidationResult::invalid(message, Some(&self.property))
    }
}

impl<T: Properties + ?Sized> Validator<T> for Length {
    fn validate(&self, instance: &T) -> ValidationResult {
        let (len, unit) = match present(instance.property(&self.property)) {
            None => return ValidationResult::valid(),
            Some(Value::String(text)) => (text.chars().count(), "character"),
            Some(Value::Array(items)) => (items.len(), "item"),
            Some(_) => return self.fail(format!("{} has no length", self.property)),
        };

        if let Some(min) = self.min {
            if len < min {
                return self.fail(format!(
                    "{} must be at least {}",
                    self.property,
                    count(min, unit)
                ));
            }
        }

        if let Some(max) = self.max {
            if len > max {
                return self.fail(format!(
                    "{} must be at most {}",
                    self.property,
                    count(max, unit)
                ));
            }
        }

        ValidationResult::valid()
    }

    fn describe(&self) -> String {
        let bound = |limit: Option<usize>| limit.map(|n| n.to_string()).unwrap_or_default();
        format!(
            "length({}, {}..{})",
            self.property,
            bound(self.min),
            bound(self.max)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Record;
    use serde_json::json;

    #[test]
    fn test_counts_characters_not_bytes() {
        let short = length("name", None, Some(4));
        assert!(short.validate(&Record::new().with("name", "Zoë")).is_valid);

        let result = short.validate(&Record::new().with("name", "Zoë Smith"));
        assert_eq!(result.message, "name must be at most 4 characters");
    }

    #[test]
    fn test_minimum_on_lists() {
        let tags = length("tags", Some(1), None);

        let result = tags.validate(&Record::new().with("tags", json!([])));
        assert_eq!(result.message, "tags must be at least 1 item");
        assert!(tags.validate(&Record::new().with("tags", json!(["a"]))).is_valid);

        let pair = length("tags", None, Some(2));
        let result = pair.validate(&Record::new().with("tags", json!(["a", "b", "c"])));
        assert_eq!(result.message, "tags must be at most 2 items");
    }

    #[test]
    fn test_single_character_bound_is_singular() {
        let result = length("initial", Some(1), None).validate(&Record::new().with("initial", ""));
        assert_eq!(result.message, "initial must be at least 1 character");
    }

    #[test]
    fn test_numbers_have_no_length() {
        let result = length("age", Some(1), None).validate(&Record::new().with("age", 42));
        assert!(!result.is_valid);
        assert_eq!(result.message, "age has no length");
    }

    #[test]
    fn test_describe_shows_open_bounds() {
        assert_eq!(
            Validator::<Record>::describe(&length("name", Some(2), None)),
            "length(name, 2..)"
        );
    }
}
