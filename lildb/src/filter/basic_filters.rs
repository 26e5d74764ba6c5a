use crate::collection::Document;
use crate::common::{FieldPath, Value};
use itertools::Itertools;
use std::fmt::Display;

/// Matches when the value at a field is strictly equal to a literal.
///
/// Equality is structural with no type coercion, except that integers and floats
/// compare numerically. An absent field is never equal to anything, not even `null`.
#[derive(Clone, Debug)]
pub struct EqualsFilter {
    field: FieldPath,
    value: Value,
}

impl EqualsFilter {
    pub(crate) fn new(field: FieldPath, value: Value) -> Self {
        EqualsFilter { field, value }
    }

    #[inline]
    pub(crate) fn apply(&self, entry: &Document) -> bool {
        self.field.resolve(entry) == Some(&self.value)
    }
}

impl Display for EqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} == {})", self.field, self.value)
    }
}

/// Matches when the value at a field is not strictly equal to a literal.
/// An absent field is unequal to every literal.
#[derive(Clone, Debug)]
pub struct NotEqualsFilter {
    field: FieldPath,
    value: Value,
}

impl NotEqualsFilter {
    pub(crate) fn new(field: FieldPath, value: Value) -> Self {
        NotEqualsFilter { field, value }
    }

    #[inline]
    pub(crate) fn apply(&self, entry: &Document) -> bool {
        self.field.resolve(entry) != Some(&self.value)
    }
}

impl Display for NotEqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} != {})", self.field, self.value)
    }
}

/// Matches when the value at a field is a member of a list of candidates.
#[derive(Clone, Debug)]
pub struct InFilter {
    field: FieldPath,
    values: Vec<Value>,
}

impl InFilter {
    pub(crate) fn new(field: FieldPath, values: Vec<Value>) -> Self {
        InFilter { field, values }
    }

    #[inline]
    pub(crate) fn apply(&self, entry: &Document) -> bool {
        match self.field.resolve(entry) {
            Some(value) => self.values.contains(value),
            None => false,
        }
    }
}

impl Display for InFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} in [{}])", self.field, self.values.iter().join(", "))
    }
}

/// Negation of a group of membership tests.
///
/// A document matches unless it satisfies *every* membership test in the group, so
/// `{"$nin": {"a": [1], "b": [2]}}` excludes only documents where both `a` is 1 and `b`
/// is 2.
#[derive(Clone, Debug)]
pub struct NotInFilter {
    filters: Vec<InFilter>,
}

impl NotInFilter {
    pub(crate) fn new(filters: Vec<InFilter>) -> Self {
        NotInFilter { filters }
    }

    #[inline]
    pub(crate) fn apply(&self, entry: &Document) -> bool {
        !self.filters.iter().all(|filter| filter.apply(entry))
    }
}

impl Display for NotInFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.filters.len() == 1 {
            write!(f, "({} not in [{}])", self.filters[0].field, self.filters[0].values.iter().join(", "))
        } else {
            write!(f, "!({})", self.filters.iter().join(" && "))
        }
    }
}

/// Matches when a field is absent or holds `null`.
#[derive(Clone, Debug)]
pub struct NullFilter {
    field: FieldPath,
}

impl NullFilter {
    pub(crate) fn new(field: FieldPath) -> Self {
        NullFilter { field }
    }

    #[inline]
    pub(crate) fn apply(&self, entry: &Document) -> bool {
        self.field.resolve(entry).map_or(true, |v| v.is_null())
    }
}

impl Display for NullFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} is null)", self.field)
    }
}

/// Matches when the length of the value at a field equals a literal.
///
/// Arrays have their element count as length, strings their character count. Any
/// other value, and an absent field, has no length and never matches.
#[derive(Clone, Debug)]
pub struct SizeFilter {
    field: FieldPath,
    size: Value,
}

impl SizeFilter {
    pub(crate) fn new(field: FieldPath, size: Value) -> Self {
        SizeFilter { field, size }
    }

    #[inline]
    pub(crate) fn apply(&self, entry: &Document) -> bool {
        let length = match self.field.resolve(entry) {
            Some(Value::Array(items)) => items.len(),
            Some(Value::String(s)) => s.chars().count(),
            _ => return false,
        };
        Value::from(length) == self.size
    }
}

impl Display for SizeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(size({}) == {})", self.field, self.size)
    }
}
