use crate::collection::Document;
use crate::errors::LilDbResult;
use std::fmt::Debug;
use std::ops::Deref;
use std::sync::Arc;

/// Contract between the document store and its durable copy.
///
/// A provider loads the whole collection at connect time and writes the whole
/// collection back on save. The store calls the provider; the provider never calls
/// the store.
///
/// Implementations must be safe to call from the autosave timer thread.
pub trait PersistenceProvider: Send + Sync {
    /// Whether the backing storage exists yet.
    fn exists(&self) -> LilDbResult<bool>;

    /// Reads every document in storage order. Missing storage gives an empty list.
    fn load_all(&self) -> LilDbResult<Vec<Document>>;

    /// Replaces the stored collection with `documents`.
    fn persist_all(&self, documents: &[&Document]) -> LilDbResult<()>;

    /// A human readable description of where documents are stored.
    fn location(&self) -> String;
}

/// A cloneable handle to a [PersistenceProvider].
///
/// All clones share the same provider.
#[derive(Clone)]
pub struct PersistenceGateway {
    inner: Arc<dyn PersistenceProvider>,
}

impl PersistenceGateway {
    pub fn new<T: PersistenceProvider + 'static>(inner: T) -> Self {
        PersistenceGateway {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for PersistenceGateway {
    type Target = Arc<dyn PersistenceProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Debug for PersistenceGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceGateway")
            .field("location", &self.inner.location())
            .finish()
    }
}
