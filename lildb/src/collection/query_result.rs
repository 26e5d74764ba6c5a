use crate::collection::Document;
use indexmap::IndexMap;

/// The output of a query.
///
/// A query without a group field yields a flat list of documents. A grouped query
/// yields buckets keyed by the string form of the group value, in first-seen order.
/// Every document is an independent copy.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryResult {
    Documents(Vec<Document>),
    Groups(IndexMap<String, Vec<Document>>),
}

impl QueryResult {
    /// The flat document list, or `None` for a grouped result.
    pub fn documents(&self) -> Option<&[Document]> {
        match self {
            QueryResult::Documents(docs) => Some(docs),
            QueryResult::Groups(_) => None,
        }
    }

    /// The groups, or `None` for a flat result.
    pub fn groups(&self) -> Option<&IndexMap<String, Vec<Document>>> {
        match self {
            QueryResult::Documents(_) => None,
            QueryResult::Groups(groups) => Some(groups),
        }
    }

    /// Flattens the result. Groups are concatenated in key order.
    pub fn into_documents(self) -> Vec<Document> {
        match self {
            QueryResult::Documents(docs) => docs,
            QueryResult::Groups(groups) => groups.into_values().flatten().collect(),
        }
    }

    /// Number of documents, or number of groups for a grouped result.
    pub fn len(&self) -> usize {
        match self {
            QueryResult::Documents(docs) => docs.len(),
            QueryResult::Groups(groups) => groups.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
