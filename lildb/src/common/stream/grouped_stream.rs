use crate::collection::Document;
use crate::common::{FieldPath, Value, GROUP_KEY_ABSENT, GROUP_KEY_DOCUMENT};
use indexmap::IndexMap;
use itertools::Itertools;

/// Partitions documents into buckets keyed by the string form of the value at `field`.
///
/// Buckets appear in the order their key is first seen, and each bucket keeps the
/// order of the input sequence.
pub(crate) fn group_documents<I>(documents: I, field: &FieldPath) -> IndexMap<String, Vec<Document>>
where
    I: IntoIterator<Item = (Document, Document)>,
{
    let mut groups: IndexMap<String, Vec<Document>> = IndexMap::new();
    for (source, emitted) in documents {
        let key = group_key(field.resolve(&source));
        groups.entry(key).or_default().push(emitted);
    }
    groups
}

/// Returns the string form used as a group key.
///
/// Absent values group under `"undefined"` and null under `"null"`. Numbers print
/// without a trailing `.0`, arrays join their elements with `,` and documents all
/// share one key.
pub fn group_key(value: Option<&Value>) -> String {
    match value {
        None => GROUP_KEY_ABSENT.to_string(),
        Some(value) => value_key(value),
    }
}

fn value_key(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(v) => v.to_string(),
        Value::I64(v) => v.to_string(),
        Value::F64(v) => float_key(*v),
        Value::String(v) => v.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                // null elements print as empty strings when an array is joined
                Value::Null => String::new(),
                other => value_key(other),
            })
            .join(","),
        Value::Document(_) => GROUP_KEY_DOCUMENT.to_string(),
    }
}

fn float_key(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() && v > 0.0 {
        "Infinity".to_string()
    } else if v.is_infinite() {
        "-Infinity".to_string()
    } else if v == 0.0 {
        "0".to_string()
    } else if v.fract() == 0.0 && v.abs() < 1e21 {
        format!("{:.0}", v)
    } else {
        v.to_string()
    }
}
