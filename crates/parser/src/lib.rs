// parser crate

pub mod document;
pub mod rules;
pub mod schema;

pub use document::{load_records, DocumentError};
pub use rules::{load_rules, parse_rules, Rule, RuleError, RuleSet};
