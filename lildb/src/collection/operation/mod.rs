mod read_operations;
mod write_operations;
mod write_result;

use crate::collection::Document;
use indexmap::IndexMap;

/// Documents keyed by id, in insertion order.
pub(crate) type DocumentMap = IndexMap<String, Document>;

pub(crate) use read_operations::*;
pub(crate) use write_operations::*;
pub(crate) use write_result::*;
