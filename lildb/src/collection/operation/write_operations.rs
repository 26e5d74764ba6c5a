use super::{DocumentMap, WriteResult};
use crate::collection::Document;
use crate::common::{generate_id, FieldPath, Value, FIELD_SEPARATOR};
use crate::errors::{ErrorKind, LilDbError, LilDbResult};
use crate::filter::Filter;
use std::collections::HashSet;

/// How documents are identified: the name of the identity field and the length of
/// generated ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct IdPolicy {
    pub(crate) id_field: String,
    pub(crate) id_length: usize,
}

/// Mutating operations over a borrowed collection.
///
/// Every operation validates its whole input before touching the collection, so a
/// failed call leaves the collection exactly as it was.
pub(crate) struct WriteOperations<'a> {
    documents: &'a mut DocumentMap,
    id_policy: &'a IdPolicy,
}

impl<'a> WriteOperations<'a> {
    pub fn new(documents: &'a mut DocumentMap, id_policy: &'a IdPolicy) -> Self {
        WriteOperations {
            documents,
            id_policy,
        }
    }

    /// Inserts new documents. Any id that already exists, in the collection or earlier
    /// in the batch, fails the whole batch with [ErrorKind::DuplicateId].
    pub fn insert(&mut self, documents: Vec<Document>) -> LilDbResult<WriteResult> {
        let mut seen = HashSet::with_capacity(documents.len());
        let mut prepared = Vec::with_capacity(documents.len());
        for mut document in documents {
            let id = self.ensure_id(&mut document, &seen)?;
            if self.documents.contains_key(&id) || seen.contains(&id) {
                log::error!("Document with id {} already exists", id);
                return Err(LilDbError::new(
                    &format!("Duplicate {}: {}", self.id_policy.id_field, id),
                    ErrorKind::DuplicateId,
                ));
            }
            seen.insert(id.clone());
            prepared.push((id, document));
        }

        let changed = !prepared.is_empty();
        let mut inserted = Vec::with_capacity(prepared.len());
        for (id, document) in prepared {
            inserted.push(document.clone());
            self.documents.insert(id, document);
        }
        Ok(WriteResult::new(inserted, changed))
    }

    /// Inserts new documents and replaces existing ones with the same id, keeping the
    /// replaced document's position. Within a batch, the last document for an id wins.
    pub fn upsert(&mut self, documents: Vec<Document>) -> LilDbResult<WriteResult> {
        let mut seen = HashSet::with_capacity(documents.len());
        let mut prepared = Vec::with_capacity(documents.len());
        for mut document in documents {
            let id = self.ensure_id(&mut document, &seen)?;
            seen.insert(id.clone());
            prepared.push((id, document));
        }

        let mut changed = false;
        let mut upserted = Vec::with_capacity(prepared.len());
        for (id, document) in prepared {
            upserted.push(document.clone());
            match self.documents.get_mut(&id) {
                Some(existing) if *existing == document => {}
                Some(existing) => {
                    *existing = document;
                    changed = true;
                }
                None => {
                    self.documents.insert(id, document);
                    changed = true;
                }
            }
        }
        Ok(WriteResult::new(upserted, changed))
    }

    /// Merges `patch` into every document matching `filter`.
    ///
    /// Mapping values merge recursively into mappings; anything else overwrites. A
    /// patch key containing the field separator is written at that path. Keys on the
    /// identity field, or any path below it, are ignored. All matched documents are returned, changed or
    /// not.
    pub fn update(&mut self, filter: &Filter, patch: &Document) -> WriteResult {
        let ids: Vec<String> = self
            .documents
            .iter()
            .filter(|(_, doc)| filter.apply(doc))
            .map(|(id, _)| id.clone())
            .collect();

        let mut changed = false;
        let mut updated = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(document) = self.documents.get_mut(&id) {
                let mut merged = document.clone();
                apply_patch(&mut merged, patch, &self.id_policy.id_field);
                if merged != *document {
                    *document = merged;
                    changed = true;
                }
                updated.push(document.clone());
            }
        }
        WriteResult::new(updated, changed)
    }

    /// Removes every document matching `filter` and returns them.
    pub fn remove(&mut self, filter: &Filter) -> WriteResult {
        let ids: Vec<String> = self
            .documents
            .iter()
            .filter(|(_, doc)| filter.apply(doc))
            .map(|(id, _)| id.clone())
            .collect();

        let removed: Vec<Document> = ids
            .iter()
            .filter_map(|id| self.documents.shift_remove(id))
            .collect();
        let changed = !removed.is_empty();
        WriteResult::new(removed, changed)
    }

    /// Reads the id of `document`, generating one when it is missing, null or empty.
    fn ensure_id(&self, document: &mut Document, reserved: &HashSet<String>) -> LilDbResult<String> {
        let id_field = &self.id_policy.id_field;
        match document.get_field(id_field) {
            Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
            None | Some(Value::Null) | Some(Value::String(_)) => {
                let id = self.fresh_id(reserved);
                document.put_field(id_field.clone(), id.clone());
                Ok(id)
            }
            Some(other) => {
                log::error!("Invalid {} {}, expected a string", id_field, other);
                Err(LilDbError::new(
                    &format!("Invalid {}: expected a string, found {}", id_field, other.type_name()),
                    ErrorKind::InvalidId,
                ))
            }
        }
    }

    fn fresh_id(&self, reserved: &HashSet<String>) -> String {
        loop {
            let id = generate_id(self.id_policy.id_length);
            if !self.documents.contains_key(&id) && !reserved.contains(&id) {
                return id;
            }
        }
    }
}

/// Converts caller input into a list of documents: a single document or an array of
/// documents.
pub(crate) fn into_documents(data: Value) -> LilDbResult<Vec<Document>> {
    match data {
        Value::Document(doc) => Ok(vec![doc]),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Document(doc) => Ok(doc),
                other => Err(invalid_data_type(&other)),
            })
            .collect(),
        other => Err(invalid_data_type(&other)),
    }
}

fn invalid_data_type(value: &Value) -> LilDbError {
    log::error!("Invalid data type {}, expected a document", value.type_name());
    LilDbError::new(
        &format!("Invalid data type: expected a document or an array of documents, found {}", value.type_name()),
        ErrorKind::InvalidDataType,
    )
}

fn apply_patch(document: &mut Document, patch: &Document, id_field: &str) {
    for (key, value) in patch.iter() {
        if key.split(FIELD_SEPARATOR).next() == Some(id_field) {
            continue;
        }
        if key.contains(FIELD_SEPARATOR) {
            FieldPath::parse(key).assign(document, value.clone());
            continue;
        }
        if let (Some(Value::Document(existing)), Value::Document(incoming)) =
            (document.get_field_mut(key), value)
        {
            existing.merge(incoming);
            continue;
        }
        document.put_field(key.clone(), value.clone());
    }
}
