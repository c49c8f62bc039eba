// validators crate

mod choice;
mod length;
mod pattern;
mod registry;
mod required;
mod validator;

pub use choice::{one_of, OneOf};
pub use length::{length, Length};
pub use pattern::{pattern, Pattern, PatternError};
pub use registry::{Registry, Validatable, Validated, Validators};
pub use required::{required, Required};
pub use validator::{custom, Custom, Validator};

pub use models::{Properties, ValidationResult};

use serde_json::Value;

/// Treats absent and null alike: both mean "no value to check".
pub(crate) fn present(value: Option<Value>) -> Option<Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

/// Textual form of scalar values, the way they read in a message or a regex.
pub(crate) fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
