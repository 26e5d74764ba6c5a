use crate::collection::Document;

/// The result of a write operation (insert, upsert, update, remove).
///
/// `WriteResult` holds copies of the affected documents and whether the collection
/// actually changed. An update that rewrites a field with the value it already holds
/// affects the document without changing the collection.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WriteResult {
    documents: Vec<Document>,
    changed: bool,
}

impl WriteResult {
    pub fn new(documents: Vec<Document>, changed: bool) -> Self {
        Self { documents, changed }
    }

    #[cfg(test)]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }
}
