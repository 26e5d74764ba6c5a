use crate::collection::Document;
use crate::common::{FieldPath, Value};
use crate::errors::{ErrorKind, LilDbError, LilDbResult};
use regex::Regex;
use std::fmt::Display;

/// Matches when the string at a field contains a match for a regular expression.
///
/// The pattern is compiled once, when the filter is built, and searched unanchored.
/// A field that is absent or not a string never matches.
#[derive(Clone, Debug)]
pub struct RegexFilter {
    field: FieldPath,
    pattern: Regex,
}

impl RegexFilter {
    pub(crate) fn new(field: FieldPath, pattern: &str) -> LilDbResult<Self> {
        match Regex::new(pattern) {
            Ok(regex) => Ok(RegexFilter {
                field,
                pattern: regex,
            }),
            Err(e) => {
                log::error!("Invalid regex pattern '{}': {}", pattern, e);
                Err(LilDbError::new(
                    &format!("Invalid query. Invalid regex pattern '{}': {}", pattern, e),
                    ErrorKind::InvalidQuery,
                ))
            }
        }
    }

    #[inline]
    pub(crate) fn apply(&self, entry: &Document) -> bool {
        match self.field.resolve(entry) {
            Some(Value::String(value)) => self.pattern.is_match(value),
            _ => false,
        }
    }
}

impl Display for RegexFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} =~ {})", self.field, self.pattern.as_str())
    }
}
