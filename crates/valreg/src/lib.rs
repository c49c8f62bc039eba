// valreg library facade
//
// Re-exports the registry API so applications only need one dependency,
// and hosts the command handlers behind the `valreg` binary.

pub mod commands;

pub use models::{Properties, Record, ValidationReport, ValidationResult};
pub use parser::{load_rules, parse_rules, Rule, RuleSet};
pub use validators::{
    custom, length, one_of, pattern, required, PatternError, Registry, Validatable, Validated,
    Validator, Validators,
};
