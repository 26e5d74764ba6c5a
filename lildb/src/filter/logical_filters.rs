use super::Filter;
use crate::collection::Document;
use itertools::Itertools;
use std::fmt::Display;

/// Matches when every sub-filter matches. An empty conjunction matches everything.
#[derive(Clone, Debug)]
pub struct AndFilter {
    filters: Vec<Filter>,
}

impl AndFilter {
    pub(crate) fn new(filters: Vec<Filter>) -> Self {
        AndFilter { filters }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    #[inline]
    pub(crate) fn apply(&self, entry: &Document) -> bool {
        self.filters.iter().all(|filter| filter.apply(entry))
    }
}

impl Display for AndFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.filters.iter().join(" && "))
    }
}

/// Matches when at least one sub-filter matches. An empty disjunction matches nothing.
#[derive(Clone, Debug)]
pub struct OrFilter {
    filters: Vec<Filter>,
}

impl OrFilter {
    pub(crate) fn new(filters: Vec<Filter>) -> Self {
        OrFilter { filters }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    #[inline]
    pub(crate) fn apply(&self, entry: &Document) -> bool {
        self.filters.iter().any(|filter| filter.apply(entry))
    }
}

impl Display for OrFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.filters.iter().join(" || "))
    }
}

#[derive(Clone, Debug)]
pub struct NotFilter {
    filter: Box<Filter>,
}

impl NotFilter {
    pub(crate) fn new(filter: Filter) -> Self {
        NotFilter {
            filter: Box::new(filter),
        }
    }

    #[inline]
    pub(crate) fn apply(&self, entry: &Document) -> bool {
        !self.filter.apply(entry)
    }
}

impl Display for NotFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(not {})", self.filter)
    }
}
