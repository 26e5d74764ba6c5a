use super::{
    AndFilter, ComparisonFilter, EqualsFilter, InFilter, NotEqualsFilter, NotFilter, NotInFilter,
    NullFilter, OrFilter, QueryParser, RegexFilter, SizeFilter,
};
use crate::collection::Document;
use crate::common::Value;
use crate::errors::LilDbResult;
use std::fmt::Display;

/// A parsed query expression.
///
/// Filters form a closed expression tree, one variant per query operator. They are
/// built once, either by parsing a query document with [QueryParser] or with the
/// fluent API ([field](super::field), [all](super::all), [and](super::and),
/// [or](super::or)), and then evaluated against any number of documents. Evaluation
/// cannot fail: every shape check happens while building the tree.
///
/// # Examples
///
/// ```rust
/// use lildb::doc;
/// use lildb::filter::{field, Filter, QueryParser};
///
/// let parsed = QueryParser::default().parse_document(&doc! { "$gte": { "age": 18 } }).unwrap();
/// let built = field("age").gte(18);
///
/// let adult = doc! { "age": 30 };
/// assert!(parsed.apply(&adult));
/// assert!(built.apply(&adult));
/// ```
#[derive(Clone, Debug)]
pub enum Filter {
    /// Matches every document.
    All,
    Equals(EqualsFilter),
    NotEquals(NotEqualsFilter),
    Comparison(ComparisonFilter),
    In(InFilter),
    NotIn(NotInFilter),
    Null(NullFilter),
    Size(SizeFilter),
    Regex(RegexFilter),
    And(AndFilter),
    Or(OrFilter),
    Not(NotFilter),
}

impl Filter {
    /// Evaluates the filter against a document.
    #[inline]
    pub fn apply(&self, entry: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Equals(filter) => filter.apply(entry),
            Filter::NotEquals(filter) => filter.apply(entry),
            Filter::Comparison(filter) => filter.apply(entry),
            Filter::In(filter) => filter.apply(entry),
            Filter::NotIn(filter) => filter.apply(entry),
            Filter::Null(filter) => filter.apply(entry),
            Filter::Size(filter) => filter.apply(entry),
            Filter::Regex(filter) => filter.apply(entry),
            Filter::And(filter) => filter.apply(entry),
            Filter::Or(filter) => filter.apply(entry),
            Filter::Not(filter) => filter.apply(entry),
        }
    }

    /// Combines this filter with another one; both must match.
    pub fn and(self, other: Filter) -> Filter {
        match self {
            Filter::And(filter) => {
                let mut filters = filter.filters().to_vec();
                filters.push(other);
                Filter::And(AndFilter::new(filters))
            }
            _ => Filter::And(AndFilter::new(vec![self, other])),
        }
    }

    /// Combines this filter with another one; either may match.
    pub fn or(self, other: Filter) -> Filter {
        match self {
            Filter::Or(filter) => {
                let mut filters = filter.filters().to_vec();
                filters.push(other);
                Filter::Or(OrFilter::new(filters))
            }
            _ => Filter::Or(OrFilter::new(vec![self, other])),
        }
    }

    /// Inverts this filter.
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Filter {
        Filter::Not(NotFilter::new(self))
    }

    /// Folds a list of filters into a single conjunction.
    pub(crate) fn all_of(mut filters: Vec<Filter>) -> Filter {
        match filters.len() {
            0 => Filter::All,
            1 => filters.remove(0),
            _ => Filter::And(AndFilter::new(filters)),
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::All => write!(f, "(all)"),
            Filter::Equals(filter) => write!(f, "{}", filter),
            Filter::NotEquals(filter) => write!(f, "{}", filter),
            Filter::Comparison(filter) => write!(f, "{}", filter),
            Filter::In(filter) => write!(f, "{}", filter),
            Filter::NotIn(filter) => write!(f, "{}", filter),
            Filter::Null(filter) => write!(f, "{}", filter),
            Filter::Size(filter) => write!(f, "{}", filter),
            Filter::Regex(filter) => write!(f, "{}", filter),
            Filter::And(filter) => write!(f, "{}", filter),
            Filter::Or(filter) => write!(f, "{}", filter),
            Filter::Not(filter) => write!(f, "{}", filter),
        }
    }
}

/// Conversion into a [Filter].
///
/// Implemented for ready-made filters and for query documents, so store operations
/// accept either. Query documents are parsed with the given parser, which carries the
/// store's operator strictness.
pub trait IntoFilter {
    fn into_filter(self, parser: &QueryParser) -> LilDbResult<Filter>;
}

impl IntoFilter for Filter {
    fn into_filter(self, _parser: &QueryParser) -> LilDbResult<Filter> {
        Ok(self)
    }
}

impl IntoFilter for &Filter {
    fn into_filter(self, _parser: &QueryParser) -> LilDbResult<Filter> {
        Ok(self.clone())
    }
}

impl IntoFilter for Document {
    fn into_filter(self, parser: &QueryParser) -> LilDbResult<Filter> {
        parser.parse_document(&self)
    }
}

impl IntoFilter for &Document {
    fn into_filter(self, parser: &QueryParser) -> LilDbResult<Filter> {
        parser.parse_document(self)
    }
}

impl IntoFilter for Value {
    fn into_filter(self, parser: &QueryParser) -> LilDbResult<Filter> {
        parser.parse(&self)
    }
}

impl IntoFilter for &Value {
    fn into_filter(self, parser: &QueryParser) -> LilDbResult<Filter> {
        parser.parse(self)
    }
}

/// Evaluates a query expression against a single document.
///
/// Returns the document itself when it matches and `None` otherwise. The query is
/// parsed with the default, strict parser.
///
/// # Errors
///
/// Returns [crate::errors::ErrorKind::InvalidQuery] if the query is malformed.
pub fn matches<'a>(query: &Value, document: &'a Document) -> LilDbResult<Option<&'a Document>> {
    let filter = QueryParser::default().parse(query)?;
    Ok(filter.apply(document).then_some(document))
}
