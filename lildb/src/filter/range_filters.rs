use crate::collection::Document;
use crate::common::{FieldPath, Value};
use std::cmp::Ordering;
use std::fmt::Display;

/// The relational operator of a [ComparisonFilter].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparisonMode {
    Greater,
    GreaterEqual,
    Lesser,
    LesserEqual,
}

impl ComparisonMode {
    #[inline]
    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            ComparisonMode::Greater => ordering == Ordering::Greater,
            ComparisonMode::GreaterEqual => ordering != Ordering::Less,
            ComparisonMode::Lesser => ordering == Ordering::Less,
            ComparisonMode::LesserEqual => ordering != Ordering::Greater,
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            ComparisonMode::Greater => ">",
            ComparisonMode::GreaterEqual => ">=",
            ComparisonMode::Lesser => "<",
            ComparisonMode::LesserEqual => "<=",
        }
    }
}

/// Compares the value at a field against a literal.
///
/// Only numbers against numbers, strings against strings and booleans against
/// booleans can be compared. Any other pairing, including an absent field, does not
/// match.
#[derive(Clone, Debug)]
pub struct ComparisonFilter {
    field: FieldPath,
    value: Value,
    mode: ComparisonMode,
}

impl ComparisonFilter {
    pub(crate) fn new(field: FieldPath, value: Value, mode: ComparisonMode) -> Self {
        ComparisonFilter { field, value, mode }
    }

    #[inline]
    pub(crate) fn apply(&self, entry: &Document) -> bool {
        self.field
            .resolve(entry)
            .and_then(|value| value.compare(&self.value))
            .map_or(false, |ordering| self.mode.accepts(ordering))
    }
}

impl Display for ComparisonFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.field, self.mode.symbol(), self.value)
    }
}
