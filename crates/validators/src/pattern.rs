use models::{Properties, ValidationResult};
use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::validator::Validator;
use crate::{as_text, present};

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown flag '{flag}' for pattern '{pattern}' (supported: i, m, s, x, u, g)")]
    UnknownFlag { flag: char, pattern: String },
}

/// Fails when the property's text does not match a regular expression.
///
/// Absent and null properties pass; pair with `required` to demand a value.
/// Numbers and booleans are matched against their textual form, arrays and
/// objects never match.
#[derive(Debug, Clone)]
pub struct Pattern {
    property: String,
    source: String,
    regex: Regex,
}

/// Builds a pattern validator.
///
/// `flags` follows the usual regex literal letters: `i` case-insensitive,
/// `m` multi-line anchors, `s` dot matches newline, `x` verbose mode. `u`
/// is always on and `g` is accepted but has no effect, since every
/// evaluation starts from the beginning of the value.
pub fn pattern(
    property: impl Into<String>,
    pattern: &str,
    flags: Option<&str>,
) -> Result<Pattern, PatternError> {
    let mut builder = RegexBuilder::new(pattern);
    builder.unicode(true);

    for flag in flags.unwrap_or_default().chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'x' => {
                builder.ignore_whitespace(true);
            }
            'u' | 'g' => {}
            other => {
                return Err(PatternError::UnknownFlag {
                    flag: other,
                    pattern: pattern.to_string(),
                })
            }
        }
    }

    let regex = builder.build().map_err(|source| PatternError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })?;

    Ok(Pattern {
        property: property.into(),
        source: pattern.to_string(),
        regex,
    })
}

impl<T: Properties + ?Sized> Validator<T> for Pattern {
    fn validate(&self, instance: &T) -> ValidationResult {
        let value = match present(instance.property(&self.property)) {
            Some(value) => value,
            None => return ValidationResult::valid(),
        };

        let matches = as_text(&value)
            .map(|text| self.regex.is_match(&text))
            .unwrap_or(false);

        if matches {
            ValidationResult::valid()
        } else {
            ValidationResult::invalid(
                format!("{} must match pattern {}", self.property, self.source),
                Some(&self.property),
            )
        }
    }

    fn describe(&self) -> String {
        format!("pattern({}, /{}/)", self.property, self.source)
    }
}
