use crate::collection::Document;
use crate::common::{FieldPath, Value};
use crate::errors::{ErrorKind, LilDbError, LilDbResult};

/// Selects and renames fields of matched documents.
///
/// A projection maps output field names to source field paths. The projected record
/// holds only the output fields, in projection order; a source path that does not
/// resolve produces `null`.
///
/// # Examples
///
/// ```rust
/// use lildb::common::stream::Projection;
/// use lildb::doc;
///
/// let projection = Projection::new().field("city", "address.city").field("name", "name");
/// let record = projection.apply(&doc! { "name": "Ann", "address": { "city": "Oslo" }, "age": 40 });
/// assert_eq!(record, doc! { "city": "Oslo", "name": "Ann" });
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Projection {
    fields: Vec<(String, FieldPath)>,
}

impl Projection {
    pub fn new() -> Self {
        Projection { fields: Vec::new() }
    }

    /// Adds an output field read from `source`.
    pub fn field(mut self, output: &str, source: impl Into<FieldPath>) -> Self {
        self.fields.push((output.to_string(), source.into()));
        self
    }

    /// Builds a projection from a document of `output -> source path` entries.
    ///
    /// A source path is either a separator-delimited string or an array of segment
    /// strings.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidQuery] if any entry is not a path.
    pub fn from_document(mapping: &Document) -> LilDbResult<Self> {
        let mut projection = Projection::new();
        for (output, source) in mapping.iter() {
            let path = match source {
                Value::String(path) => FieldPath::parse(path),
                Value::Array(segments) => {
                    let mut parts = Vec::with_capacity(segments.len());
                    for segment in segments {
                        match segment.as_string() {
                            Some(s) => parts.push(s.clone()),
                            None => return Err(invalid_projection(output, source)),
                        }
                    }
                    FieldPath::from_segments(parts)
                }
                _ => return Err(invalid_projection(output, source)),
            };
            projection.fields.push((output.clone(), path));
        }
        Ok(projection)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[(String, FieldPath)] {
        &self.fields
    }

    /// Projects a single document into a new, independent record.
    pub fn apply(&self, document: &Document) -> Document {
        let mut projected = Document::new();
        for (output, source) in self.fields.iter() {
            let value = source.resolve(document).cloned().unwrap_or(Value::Null);
            projected.put_field(output.clone(), value);
        }
        projected
    }
}

fn invalid_projection(output: &str, source: &Value) -> LilDbError {
    log::error!("Invalid projection for {}: {} is not a field path", output, source);
    LilDbError::new(
        &format!(
            "Invalid query. Projection of {} must be a field path, found {}",
            output,
            source.type_name()
        ),
        ErrorKind::InvalidQuery,
    )
}

impl TryFrom<Document> for Projection {
    type Error = LilDbError;

    fn try_from(value: Document) -> Result<Self, Self::Error> {
        Projection::from_document(&value)
    }
}

impl TryFrom<&Document> for Projection {
    type Error = LilDbError;

    fn try_from(value: &Document) -> Result<Self, Self::Error> {
        Projection::from_document(value)
    }
}
