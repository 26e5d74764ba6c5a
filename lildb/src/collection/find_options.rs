use crate::common::stream::Projection;
use crate::common::{FieldPath, SortOrder};

/// Options for shaping the result of a query.
///
/// `FindOptions` selects an optional sort field, an optional group field and an
/// optional projection. It supports method chaining for convenient configuration.
///
/// When both an ascending and a descending sort are set, the ascending one wins.
///
/// # Examples
///
/// ```rust
/// use lildb::collection::{group_by, order_by, FindOptions};
/// use lildb::common::stream::Projection;
/// use lildb::common::SortOrder;
///
/// let options = FindOptions::new()
///     .sort_desc("age")
///     .project(Projection::new().field("name", "name"));
///
/// let options = order_by("name", SortOrder::Ascending);
/// let options = group_by("role").sort_asc("age");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FindOptions {
    pub(crate) sort_asc: Option<FieldPath>,
    pub(crate) sort_desc: Option<FieldPath>,
    pub(crate) group: Option<FieldPath>,
    pub(crate) projection: Option<Projection>,
}

/// Creates `FindOptions` sorting by a field in the given direction.
pub fn order_by(field: impl Into<FieldPath>, sort_order: SortOrder) -> FindOptions {
    match sort_order {
        SortOrder::Ascending => FindOptions::new().sort_asc(field),
        SortOrder::Descending => FindOptions::new().sort_desc(field),
    }
}

/// Creates `FindOptions` grouping by a field.
pub fn group_by(field: impl Into<FieldPath>) -> FindOptions {
    FindOptions::new().group_by(field)
}

impl FindOptions {
    pub fn new() -> Self {
        FindOptions::default()
    }

    pub fn sort_asc(mut self, field: impl Into<FieldPath>) -> Self {
        self.sort_asc = Some(field.into());
        self
    }

    pub fn sort_desc(mut self, field: impl Into<FieldPath>) -> Self {
        self.sort_desc = Some(field.into());
        self
    }

    pub fn group_by(mut self, field: impl Into<FieldPath>) -> Self {
        self.group = Some(field.into());
        self
    }

    pub fn project(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    /// The sort that will be applied, if any.
    pub fn sort(&self) -> Option<(&FieldPath, SortOrder)> {
        match (&self.sort_asc, &self.sort_desc) {
            (Some(field), _) => Some((field, SortOrder::Ascending)),
            (None, Some(field)) => Some((field, SortOrder::Descending)),
            (None, None) => None,
        }
    }

    pub fn group(&self) -> Option<&FieldPath> {
        self.group.as_ref()
    }

    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }
}
