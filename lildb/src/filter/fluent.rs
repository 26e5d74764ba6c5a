use super::{
    AndFilter, ComparisonFilter, ComparisonMode, EqualsFilter, Filter, InFilter, NotEqualsFilter,
    NotFilter, NotInFilter, NullFilter, OrFilter, RegexFilter, SizeFilter,
};
use crate::common::{FieldPath, Value};
use crate::errors::LilDbResult;

/// Creates a fluent filter builder for the specified field path.
///
/// The path may use the field separator to address nested values, as in
/// `field("address.city")`.
pub fn field(field_name: &str) -> FluentFilter {
    FluentFilter {
        field: FieldPath::parse(field_name),
    }
}

/// Creates a filter matching every document.
#[inline]
pub fn all() -> Filter {
    Filter::All
}

/// Creates a filter that matches when all of `filters` match. An empty list matches
/// everything.
pub fn and(filters: Vec<Filter>) -> Filter {
    Filter::And(AndFilter::new(filters))
}

/// Creates a filter that matches when any of `filters` matches. An empty list matches
/// nothing.
pub fn or(filters: Vec<Filter>) -> Filter {
    Filter::Or(OrFilter::new(filters))
}

/// Inverts `filter`.
pub fn not(filter: Filter) -> Filter {
    Filter::Not(NotFilter::new(filter))
}

/// A fluent builder for filters on a single field.
///
/// Each method consumes the builder and gives the same [Filter] that parsing the
/// equivalent query document would give.
///
/// ```rust
/// use lildb::doc;
/// use lildb::filter::field;
///
/// let filter = field("age").gte(18).and(field("role").in_array(vec!["admin", "owner"]));
/// assert!(filter.apply(&doc! { "age": 21, "role": "owner" }));
/// ```
pub struct FluentFilter {
    field: FieldPath,
}

impl FluentFilter {
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> Filter {
        Filter::Equals(EqualsFilter::new(self.field, value.into()))
    }

    #[inline]
    pub fn ne<T: Into<Value>>(self, value: T) -> Filter {
        Filter::NotEquals(NotEqualsFilter::new(self.field, value.into()))
    }

    #[inline]
    pub fn gt<T: Into<Value>>(self, value: T) -> Filter {
        self.compare(value.into(), ComparisonMode::Greater)
    }

    #[inline]
    pub fn gte<T: Into<Value>>(self, value: T) -> Filter {
        self.compare(value.into(), ComparisonMode::GreaterEqual)
    }

    #[inline]
    pub fn lt<T: Into<Value>>(self, value: T) -> Filter {
        self.compare(value.into(), ComparisonMode::Lesser)
    }

    #[inline]
    pub fn lte<T: Into<Value>>(self, value: T) -> Filter {
        self.compare(value.into(), ComparisonMode::LesserEqual)
    }

    /// Matches when the field value equals one of `values`.
    pub fn in_array<T: Into<Value>>(self, values: Vec<T>) -> Filter {
        Filter::In(InFilter::new(
            self.field,
            values.into_iter().map(|v| v.into()).collect(),
        ))
    }

    /// Matches when the field value equals none of `values`, including when the field
    /// is absent.
    pub fn not_in_array<T: Into<Value>>(self, values: Vec<T>) -> Filter {
        Filter::NotIn(NotInFilter::new(vec![InFilter::new(
            self.field,
            values.into_iter().map(|v| v.into()).collect(),
        )]))
    }

    /// Matches when the field is absent or `null`.
    pub fn is_null(self) -> Filter {
        Filter::Null(NullFilter::new(self.field))
    }

    /// Matches when the field holds an array with `size` elements or a string with
    /// `size` characters.
    pub fn size(self, size: usize) -> Filter {
        Filter::Size(SizeFilter::new(self.field, Value::from(size)))
    }

    /// Matches when the field holds a string matching `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [crate::errors::ErrorKind::InvalidQuery] if the pattern does not compile.
    pub fn regex(self, pattern: &str) -> LilDbResult<Filter> {
        Ok(Filter::Regex(RegexFilter::new(self.field, pattern)?))
    }

    fn compare(self, value: Value, mode: ComparisonMode) -> Filter {
        Filter::Comparison(ComparisonFilter::new(self.field, value, mode))
    }
}
