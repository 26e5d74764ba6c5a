use crate::collection::StoreEventListener;
use crate::errors::{LilDbError, LilDbResult};
use crate::lildb::LilDb;
use crate::lildb_config::LilDbConfig;
use crate::store::PersistenceGateway;
use std::path::PathBuf;
use std::time::Duration;

/// Builder for configuring and opening a [LilDb] store.
///
/// Setters validate as they go. The first invalid setting is remembered and returned
/// by [LilDbBuilder::open]; later setters are ignored once an error was captured.
///
/// # Examples
///
/// ```rust,no_run
/// use lildb::LilDb;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let db = LilDb::builder()
///     .file_path("data/users.jsonl")
///     .auto_save(Duration::from_secs(5))
///     .open()?;
/// # db.close()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct LilDbBuilder {
    error: Option<LilDbError>,
    config: LilDbConfig,
}

impl LilDbBuilder {
    /// Creates a builder for an in-memory store with default settings.
    pub fn new() -> Self {
        LilDbBuilder {
            error: None,
            config: LilDbConfig::new(),
        }
    }

    /// Persists the store to the JSON Lines file at `path`.
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_file_path(path) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Writes pending changes every `interval` on a background timer.
    ///
    /// Requires a backing file.
    pub fn auto_save(mut self, interval: Duration) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_auto_save(interval) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Sets the field holding document ids. Defaults to `_id`.
    pub fn id_field(mut self, id_field: &str) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_id_field(id_field) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Sets the length of generated ids.
    pub fn id_length(mut self, id_length: usize) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_id_length(id_length) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Whether unknown `$` operators in queries are rejected (the default) or treated
    /// as plain field names.
    pub fn strict_operators(mut self, strict: bool) -> Self {
        self.config.set_strict_operators(strict);
        self
    }

    /// Receives loaded, saved and error events.
    pub fn log_listener(mut self, listener: StoreEventListener) -> Self {
        self.config.set_listener(listener);
        self
    }

    /// Persists through a custom gateway instead of a JSON Lines file.
    pub fn gateway(mut self, gateway: PersistenceGateway) -> Self {
        self.config.set_gateway(gateway);
        self
    }

    /// Opens the store.
    ///
    /// With a backing file, a missing file is created empty and an existing one is
    /// loaded. Configuration errors captured by the setters are returned here.
    pub fn open(self) -> LilDbResult<LilDb> {
        if let Some(error) = self.error {
            return Err(error);
        }
        LilDb::open(self.config)
    }
}
