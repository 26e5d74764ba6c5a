use crate::collection::operation::{
    into_documents, DocumentMap, IdPolicy, ReadOperations, WriteOperations,
};
use crate::collection::{Document, FindOptions, QueryResult, StoreEvent, StoreEventListener};
use crate::common::{schedule_repeating, ScheduledTask, Value};
use crate::errors::{ErrorKind, LilDbError, LilDbResult};
use crate::filter::{IntoFilter, QueryParser};
use crate::lildb_builder::LilDbBuilder;
use crate::lildb_config::LilDbConfig;
use crate::store::{JsonlGateway, PersistenceGateway, PersistenceProvider};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// An embedded JSON document store.
///
/// `LilDb` keeps one collection of schema-less documents in memory and mirrors it to
/// a JSON Lines file. Documents are selected with query documents or fluent filters,
/// and every document returned is an independent copy.
///
/// `LilDb` uses the PIMPL pattern: clones are cheap and share the same collection, so
/// a store can be handed to other threads. Each operation holds the collection lock
/// for its whole read-modify-write.
///
/// # Examples
///
/// ```rust
/// use lildb::{doc, LilDb};
/// use lildb::collection::FindOptions;
///
/// let db = LilDb::new();
/// db.insert(vec![doc! { "name": "John", "age": 30 }, doc! { "name": "Jane", "age": 25 }]).unwrap();
///
/// let adults = db.find(doc! { "$gte": { "age": 18 } }).unwrap();
/// assert_eq!(adults.len(), 2);
///
/// let sorted = db.query(doc! {}, &FindOptions::new().sort_asc("age")).unwrap();
/// assert_eq!(sorted.documents().unwrap()[0].get("name").unwrap().as_string().unwrap(), "Jane");
/// ```
#[derive(Clone)]
pub struct LilDb {
    inner: Arc<LilDbInner>,
}

impl LilDb {
    /// Creates a builder to configure and open a store.
    pub fn builder() -> LilDbBuilder {
        LilDbBuilder::new()
    }

    /// Creates an empty in-memory store with no backing file.
    pub fn new() -> Self {
        LilDb {
            inner: Arc::new(LilDbInner::new(LilDbConfig::new())),
        }
    }

    /// Opens the store backed by the JSON Lines file at `path`, creating the file if it
    /// does not exist yet.
    pub fn connect(path: impl Into<PathBuf>) -> LilDbResult<Self> {
        LilDb::builder().file_path(path).open()
    }

    pub(crate) fn open(config: LilDbConfig) -> LilDbResult<Self> {
        let auto_save = config.auto_save();
        let db = LilDb {
            inner: Arc::new(LilDbInner::new(config)),
        };
        db.inner.connect()?;

        if let Some(interval) = auto_save {
            if db.inner.gateway.read().is_none() {
                log::error!("Autosave requires a backing file");
                return Err(LilDbError::new(
                    "Autosave requires a backing file",
                    ErrorKind::NoBackingFile,
                ));
            }
            let weak: Weak<LilDbInner> = Arc::downgrade(&db.inner);
            let task = schedule_repeating(interval, move || {
                if let Some(inner) = weak.upgrade() {
                    inner.auto_save();
                }
            })?;
            *db.inner.auto_save.lock() = Some(task);
        }
        Ok(db)
    }

    /// Inserts a document or an array of documents and returns copies of what was
    /// stored, ids included.
    ///
    /// # Errors
    ///
    /// * [ErrorKind::InvalidDataType] - `data` is not a document or an array of documents
    /// * [ErrorKind::InvalidId] - an id is present but is not a string
    /// * [ErrorKind::DuplicateId] - an id already exists or repeats within the batch
    ///
    /// Nothing is inserted when any document is rejected.
    pub fn insert(&self, data: impl Into<Value>) -> LilDbResult<Vec<Document>> {
        self.inner.insert(data.into())
    }

    /// Like [LilDb::insert], but a document whose id already exists replaces the
    /// stored one.
    pub fn upsert(&self, data: impl Into<Value>) -> LilDbResult<Vec<Document>> {
        self.inner.upsert(data.into())
    }

    /// Runs a query and shapes the matches with `options`.
    ///
    /// `query` is a query document or a [crate::filter::Filter].
    pub fn query(&self, query: impl IntoFilter, options: &FindOptions) -> LilDbResult<QueryResult> {
        self.inner.query(query, options)
    }

    /// Runs a query without sorting, grouping or projection.
    pub fn find(&self, query: impl IntoFilter) -> LilDbResult<Vec<Document>> {
        Ok(self.inner.query(query, &FindOptions::new())?.into_documents())
    }

    /// Deep-merges `patch` into every matching document and returns the matched
    /// documents after the merge.
    pub fn update(&self, query: impl IntoFilter, patch: Document) -> LilDbResult<Vec<Document>> {
        self.inner.update(query, patch)
    }

    /// Removes every matching document and returns the removed documents.
    pub fn remove(&self, query: impl IntoFilter) -> LilDbResult<Vec<Document>> {
        self.inner.remove(query)
    }

    /// Number of documents in the collection.
    pub fn count(&self) -> usize {
        self.inner.documents.read().len()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Document> {
        ReadOperations::new(&self.inner.documents.read()).get_by_id(id)
    }

    /// Copies of every document, in insertion order.
    pub fn all_documents(&self) -> Vec<Document> {
        ReadOperations::new(&self.inner.documents.read()).all()
    }

    /// Whether the collection changed since it was last persisted.
    pub fn is_dirty(&self) -> bool {
        self.inner.dirty.load(Ordering::SeqCst)
    }

    /// When the collection was last written to its backing file.
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        *self.inner.last_saved.read()
    }

    /// Where the collection is persisted, if anywhere.
    pub fn location(&self) -> Option<String> {
        self.inner.gateway.read().as_ref().map(|g| g.location())
    }

    /// Writes the collection to its backing file if it changed since the last write.
    ///
    /// Returns whether anything was written.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::NoBackingFile] if the store has no backing file, or the
    /// persistence error. A failed write leaves the store dirty.
    pub fn save(&self) -> LilDbResult<bool> {
        self.inner.save()
    }

    /// Writes the collection to `path` and makes it the backing file.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::FileExists] if `path` exists and `overwrite` is false. The
    /// backing file is unchanged in that case.
    pub fn save_as(&self, path: impl Into<PathBuf>, overwrite: bool) -> LilDbResult<()> {
        self.inner.save_as(path.into(), overwrite)
    }

    /// Stops autosave and writes pending changes. Calling it again has no further
    /// effect.
    pub fn close(&self) -> LilDbResult<()> {
        self.inner.close()
    }

    /// Replaces the listener receiving [StoreEvent]s.
    pub fn set_log_listener(&self, listener: StoreEventListener) {
        *self.inner.listener.write() = Some(listener);
    }

    pub fn config(&self) -> &LilDbConfig {
        &self.inner.config
    }
}

impl Default for LilDb {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for LilDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LilDb")
            .field("count", &self.count())
            .field("location", &self.location())
            .field("dirty", &self.is_dirty())
            .finish()
    }
}

struct LilDbInner {
    config: LilDbConfig,
    parser: QueryParser,
    id_policy: IdPolicy,
    documents: RwLock<DocumentMap>,
    dirty: AtomicBool,
    gateway: RwLock<Option<PersistenceGateway>>,
    listener: RwLock<Option<StoreEventListener>>,
    last_saved: RwLock<Option<DateTime<Utc>>>,
    auto_save: Mutex<Option<ScheduledTask>>,
}

impl LilDbInner {
    fn new(config: LilDbConfig) -> Self {
        LilDbInner {
            parser: config.query_parser(),
            id_policy: config.id_policy(),
            documents: RwLock::new(DocumentMap::new()),
            dirty: AtomicBool::new(false),
            gateway: RwLock::new(config.persistence_gateway()),
            listener: RwLock::new(config.listener().cloned()),
            last_saved: RwLock::new(None),
            auto_save: Mutex::new(None),
            config,
        }
    }

    fn connect(&self) -> LilDbResult<()> {
        let Some(gateway) = self.gateway.read().clone() else {
            return Ok(());
        };

        let mut normalized = false;
        if gateway.exists()? {
            let loaded = gateway.load_all()?;
            let line_count = loaded.len();
            let missing_ids = loaded.iter().any(|doc| !self.has_valid_id(doc));

            let mut documents = self.documents.write();
            WriteOperations::new(&mut documents, &self.id_policy).upsert(loaded)?;
            // generated ids and collapsed duplicates must reach the file
            normalized = missing_ids || documents.len() != line_count;
            log::debug!("Loaded {} documents from {}", documents.len(), gateway.location());
        } else {
            log::debug!("Creating backing file {}", gateway.location());
            gateway.persist_all(&[])?;
            *self.last_saved.write() = Some(Utc::now());
        }

        self.dirty.store(normalized, Ordering::SeqCst);
        self.notify(StoreEvent::loaded());
        Ok(())
    }

    fn insert(&self, data: Value) -> LilDbResult<Vec<Document>> {
        let documents = into_documents(data)?;
        let mut collection = self.documents.write();
        let result = WriteOperations::new(&mut collection, &self.id_policy).insert(documents)?;
        self.mark_dirty(result.changed());
        Ok(result.into_documents())
    }

    fn upsert(&self, data: Value) -> LilDbResult<Vec<Document>> {
        let documents = into_documents(data)?;
        let mut collection = self.documents.write();
        let result = WriteOperations::new(&mut collection, &self.id_policy).upsert(documents)?;
        self.mark_dirty(result.changed());
        Ok(result.into_documents())
    }

    fn query(&self, query: impl IntoFilter, options: &FindOptions) -> LilDbResult<QueryResult> {
        let filter = query.into_filter(&self.parser)?;
        let collection = self.documents.read();
        Ok(ReadOperations::new(&collection).find(&filter, options))
    }

    fn update(&self, query: impl IntoFilter, patch: Document) -> LilDbResult<Vec<Document>> {
        let filter = query.into_filter(&self.parser)?;
        let mut collection = self.documents.write();
        let result = WriteOperations::new(&mut collection, &self.id_policy).update(&filter, &patch);
        self.mark_dirty(result.changed());
        Ok(result.into_documents())
    }

    fn remove(&self, query: impl IntoFilter) -> LilDbResult<Vec<Document>> {
        let filter = query.into_filter(&self.parser)?;
        let mut collection = self.documents.write();
        let result = WriteOperations::new(&mut collection, &self.id_policy).remove(&filter);
        self.mark_dirty(result.changed());
        Ok(result.into_documents())
    }

    // must be called with the collection write lock held
    #[inline]
    fn mark_dirty(&self, changed: bool) {
        if changed {
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    fn has_valid_id(&self, document: &Document) -> bool {
        matches!(
            document.get_field(&self.id_policy.id_field),
            Some(Value::String(id)) if !id.is_empty()
        )
    }

    fn save(&self) -> LilDbResult<bool> {
        let Some(gateway) = self.gateway.read().clone() else {
            log::error!("Cannot save, no backing file configured");
            return Err(LilDbError::new(
                "No backing file configured",
                ErrorKind::NoBackingFile,
            ));
        };

        // the read lock keeps writers out between clearing the flag and persisting
        let collection = self.documents.read();
        if !self.dirty.swap(false, Ordering::SeqCst) {
            return Ok(false);
        }

        let snapshot: Vec<&Document> = collection.values().collect();
        match gateway.persist_all(&snapshot) {
            Ok(()) => {
                *self.last_saved.write() = Some(Utc::now());
                Ok(true)
            }
            Err(e) => {
                log::error!("Failed to save to {}: {}", gateway.location(), e);
                self.dirty.store(true, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    fn save_as(&self, path: PathBuf, overwrite: bool) -> LilDbResult<()> {
        let target = JsonlGateway::new(path);
        if !overwrite && target.exists()? {
            log::error!("File {} already exists", target.location());
            return Err(LilDbError::new(
                &format!("File exists: {}", target.location()),
                ErrorKind::FileExists,
            ));
        }

        let collection = self.documents.read();
        let was_dirty = self.dirty.swap(false, Ordering::SeqCst);
        let snapshot: Vec<&Document> = collection.values().collect();
        if let Err(e) = target.persist_all(&snapshot) {
            log::error!("Failed to save to {}: {}", target.location(), e);
            self.dirty.store(was_dirty, Ordering::SeqCst);
            return Err(e);
        }

        *self.last_saved.write() = Some(Utc::now());
        *self.gateway.write() = Some(PersistenceGateway::new(target));
        Ok(())
    }

    fn auto_save(&self) {
        match self.save() {
            Ok(true) => {
                let time = self.last_saved.read().unwrap_or_else(Utc::now);
                self.notify(StoreEvent::saved(time));
            }
            Ok(false) => {}
            Err(e) => {
                log::warn!("Autosave failed: {}", e);
                self.notify(StoreEvent::error(e.message()));
            }
        }
    }

    fn close(&self) -> LilDbResult<()> {
        if let Some(task) = self.auto_save.lock().take() {
            task.cancel();
        }
        if self.gateway.read().is_some() {
            self.save()?;
        }
        Ok(())
    }

    fn notify(&self, event: StoreEvent) {
        let listener = self.listener.read().clone();
        if let Some(listener) = listener {
            listener.notify(event);
        }
    }
}
