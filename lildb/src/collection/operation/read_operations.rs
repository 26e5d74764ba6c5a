use super::DocumentMap;
use crate::collection::{Document, FindOptions, QueryResult};
use crate::common::stream::{group_documents, sort_documents};
use crate::filter::Filter;

/// Read-only operations over a borrowed collection.
///
/// Every query is a full scan in insertion order. Results are always owned copies.
pub(crate) struct ReadOperations<'a> {
    documents: &'a DocumentMap,
}

impl<'a> ReadOperations<'a> {
    pub fn new(documents: &'a DocumentMap) -> Self {
        ReadOperations { documents }
    }

    /// Returns the stored documents matching `filter`, in insertion order.
    pub fn select(&self, filter: &Filter) -> Vec<&'a Document> {
        self.documents
            .values()
            .filter(|doc| filter.apply(doc))
            .collect()
    }

    /// Runs `filter` and shapes the matches according to `find_options`.
    pub fn find(&self, filter: &Filter, find_options: &FindOptions) -> QueryResult {
        let matched = self.select(filter).into_iter().cloned().collect();
        shape(matched, find_options)
    }

    pub fn get_by_id(&self, id: &str) -> Option<Document> {
        self.documents.get(id).cloned()
    }

    pub fn all(&self) -> Vec<Document> {
        self.documents.values().cloned().collect()
    }
}

/// Sorts, then groups or projects, a list of matched documents.
///
/// Groups are keyed on the source documents, so a projection that drops the group
/// field does not change the grouping.
pub(crate) fn shape(mut documents: Vec<Document>, find_options: &FindOptions) -> QueryResult {
    if let Some((field, order)) = find_options.sort() {
        sort_documents(&mut documents, field, order);
    }

    let projection = find_options.projection();
    match find_options.group() {
        Some(group) => {
            let pairs = documents.into_iter().map(|doc| {
                let emitted = match projection {
                    Some(projection) => projection.apply(&doc),
                    None => doc.clone(),
                };
                (doc, emitted)
            });
            QueryResult::Groups(group_documents(pairs, group))
        }
        None => match projection {
            Some(projection) => {
                QueryResult::Documents(documents.iter().map(|doc| projection.apply(doc)).collect())
            }
            None => QueryResult::Documents(documents),
        },
    }
}
