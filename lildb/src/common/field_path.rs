use crate::collection::Document;
use crate::common::{Value, FIELD_SEPARATOR};
use std::fmt::{Display, Formatter};

/// A field path parsed once into its segments.
///
/// Paths address values inside nested documents. They are usually written with the
/// field separator (`"address.city"`), but can also be built from an explicit list of
/// segments, which allows field names that themselves contain the separator.
///
/// Numeric segments index into arrays, so `"tags.1"` reads the second element of the
/// `tags` array.
///
/// # Examples
///
/// ```rust
/// use lildb::common::FieldPath;
/// use lildb::doc;
///
/// let doc = doc! { "location": { "city": "New York" }, "tags": ["a", "b"] };
/// assert_eq!(FieldPath::parse("location.city").resolve(&doc).unwrap().as_string().unwrap(), "New York");
/// assert_eq!(FieldPath::parse("tags.1").resolve(&doc).unwrap().as_string().unwrap(), "b");
/// assert!(FieldPath::parse("tags.5").resolve(&doc).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a separator-delimited path. An empty string gives an empty path.
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return FieldPath::default();
        }
        FieldPath {
            segments: path.split(FIELD_SEPARATOR).map(|s| s.to_string()).collect(),
        }
    }

    /// Builds a path from explicit segments, taken verbatim.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldPath {
            segments: segments.into_iter().map(|s| s.into()).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Resolves the path against a document.
    ///
    /// Returns `None` when the path is empty, when any segment is missing, or when an
    /// intermediate value is neither a document nor an array indexable by the segment.
    /// An explicit `null` stored at the path is returned as `Some(&Value::Null)`.
    pub fn resolve<'a>(&self, document: &'a Document) -> Option<&'a Value> {
        let (first, rest) = self.segments.split_first()?;
        let mut current = document.get_field(first)?;
        for segment in rest {
            current = match current {
                Value::Document(doc) => doc.get_field(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Writes `value` at the path, creating intermediate documents for missing segments.
    ///
    /// An intermediate array is descended into when the segment is an index inside its
    /// bounds. Any other intermediate value that is not a document is replaced by an
    /// empty document. Assigning an empty path is a no-op.
    pub fn assign(&self, document: &mut Document, value: Value) {
        let Some((first, rest)) = self.segments.split_first() else {
            return;
        };
        if rest.is_empty() {
            document.put_field(first.clone(), value);
            return;
        }
        let slot = document.field_slot(first);
        assign_into(slot, rest, value);
    }
}

fn assign_into(target: &mut Value, segments: &[String], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *target = value;
        return;
    };

    if let Value::Array(items) = target {
        if let Some(slot) = head.parse::<usize>().ok().and_then(|i| items.get_mut(i)) {
            assign_into(slot, rest, value);
            return;
        }
    }

    if !target.is_document() {
        *target = Value::Document(Document::new());
    }
    if let Value::Document(doc) = target {
        if rest.is_empty() {
            doc.put_field(head.clone(), value);
        } else {
            assign_into(doc.field_slot(head), rest, value);
        }
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join(FIELD_SEPARATOR))
    }
}

impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        FieldPath::parse(value)
    }
}

impl From<String> for FieldPath {
    fn from(value: String) -> Self {
        FieldPath::parse(&value)
    }
}

impl From<&String> for FieldPath {
    fn from(value: &String) -> Self {
        FieldPath::parse(value)
    }
}

impl From<Vec<String>> for FieldPath {
    fn from(value: Vec<String>) -> Self {
        FieldPath::from_segments(value)
    }
}

impl From<&[&str]> for FieldPath {
    fn from(value: &[&str]) -> Self {
        FieldPath::from_segments(value.iter().copied())
    }
}

impl From<&FieldPath> for FieldPath {
    fn from(value: &FieldPath) -> Self {
        value.clone()
    }
}
