use crate::collection::Document;
use crate::common::{FieldPath, SortOrder, Value};
use std::cmp::Ordering;

/// Stable-sorts documents by the value at `field`.
///
/// Numbers, strings and booleans are ordered among themselves in the requested
/// direction. Values of different kinds are never compared with each other: they are
/// kept in separate runs (numbers, then strings, then booleans) so the comparator stays
/// a total order. Absent values, nulls, NaN, arrays and documents cannot be ordered at
/// all; they go last, in their original relative order, whatever the direction.
pub(crate) fn sort_documents(documents: &mut [Document], field: &FieldPath, order: SortOrder) {
    documents.sort_by(|a, b| {
        let a_value = field.resolve(a);
        let b_value = field.resolve(b);
        let (a_rank, b_rank) = (sort_rank(a_value), sort_rank(b_value));
        a_rank.cmp(&b_rank).then_with(|| match (a_value, b_value) {
            (Some(x), Some(y)) if a_rank < UNORDERED_RANK => {
                order.apply(x.compare(y).unwrap_or(Ordering::Equal))
            }
            _ => Ordering::Equal,
        })
    });
}

const UNORDERED_RANK: u8 = 3;

fn sort_rank(value: Option<&Value>) -> u8 {
    match value {
        Some(Value::F64(v)) if v.is_nan() => UNORDERED_RANK,
        Some(Value::I64(_)) | Some(Value::F64(_)) => 0,
        Some(Value::String(_)) => 1,
        Some(Value::Bool(_)) => 2,
        _ => UNORDERED_RANK,
    }
}
