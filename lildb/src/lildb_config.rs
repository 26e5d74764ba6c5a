//! Configuration of a LilDb store.

use crate::collection::operation::IdPolicy;
use crate::collection::StoreEventListener;
use crate::common::{DEFAULT_ID_LENGTH, DOC_ID, FIELD_SEPARATOR};
use crate::errors::{ErrorKind, LilDbError, LilDbResult};
use crate::filter::QueryParser;
use crate::store::{JsonlGateway, PersistenceGateway};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings a [crate::LilDb] store is opened with.
///
/// A configuration is assembled through [crate::LilDbBuilder], which validates every
/// setting as it is applied. The defaults describe an in-memory store: no backing
/// file, no autosave, `_id` identities of 32 characters and strict query operators.
#[derive(Clone, Debug)]
pub struct LilDbConfig {
    file_path: Option<PathBuf>,
    auto_save: Option<Duration>,
    id_field: String,
    id_length: usize,
    strict_operators: bool,
    listener: Option<StoreEventListener>,
    gateway: Option<PersistenceGateway>,
}

impl Default for LilDbConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LilDbConfig {
    pub fn new() -> Self {
        LilDbConfig {
            file_path: None,
            auto_save: None,
            id_field: DOC_ID.to_string(),
            id_length: DEFAULT_ID_LENGTH,
            strict_operators: true,
            listener: None,
            gateway: None,
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn auto_save(&self) -> Option<Duration> {
        self.auto_save
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn id_length(&self) -> usize {
        self.id_length
    }

    pub fn strict_operators(&self) -> bool {
        self.strict_operators
    }

    pub fn listener(&self) -> Option<&StoreEventListener> {
        self.listener.as_ref()
    }

    pub(crate) fn set_file_path(&mut self, path: impl Into<PathBuf>) -> LilDbResult<()> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            log::error!("Backing file path cannot be empty");
            return Err(LilDbError::new(
                "Backing file path cannot be empty",
                ErrorKind::InvalidOperation,
            ));
        }
        self.file_path = Some(path);
        Ok(())
    }

    pub(crate) fn set_auto_save(&mut self, interval: Duration) -> LilDbResult<()> {
        if interval.is_zero() {
            log::error!("Autosave interval must be greater than zero");
            return Err(LilDbError::new(
                "Autosave interval must be greater than zero",
                ErrorKind::InvalidOperation,
            ));
        }
        self.auto_save = Some(interval);
        Ok(())
    }

    pub(crate) fn set_id_field(&mut self, id_field: &str) -> LilDbResult<()> {
        if id_field.is_empty() || id_field.contains(FIELD_SEPARATOR) {
            log::error!("Invalid id field '{}'", id_field);
            return Err(LilDbError::new(
                &format!(
                    "Id field must be a non-empty name without '{}', found '{}'",
                    FIELD_SEPARATOR, id_field
                ),
                ErrorKind::InvalidOperation,
            ));
        }
        self.id_field = id_field.to_string();
        Ok(())
    }

    pub(crate) fn set_id_length(&mut self, id_length: usize) -> LilDbResult<()> {
        if id_length == 0 {
            log::error!("Id length must be greater than zero");
            return Err(LilDbError::new(
                "Id length must be greater than zero",
                ErrorKind::InvalidOperation,
            ));
        }
        self.id_length = id_length;
        Ok(())
    }

    pub(crate) fn set_strict_operators(&mut self, strict: bool) {
        self.strict_operators = strict;
    }

    pub(crate) fn set_listener(&mut self, listener: StoreEventListener) {
        self.listener = Some(listener);
    }

    pub(crate) fn set_gateway(&mut self, gateway: PersistenceGateway) {
        self.gateway = Some(gateway);
    }

    /// The gateway the store persists through: a custom gateway if one was set,
    /// otherwise a JSON Lines file at the configured path.
    pub(crate) fn persistence_gateway(&self) -> Option<PersistenceGateway> {
        match (&self.gateway, &self.file_path) {
            (Some(gateway), _) => Some(gateway.clone()),
            (None, Some(path)) => Some(PersistenceGateway::new(JsonlGateway::new(path))),
            (None, None) => None,
        }
    }

    pub(crate) fn query_parser(&self) -> QueryParser {
        QueryParser::new(self.strict_operators)
    }

    pub(crate) fn id_policy(&self) -> IdPolicy {
        IdPolicy {
            id_field: self.id_field.clone(),
            id_length: self.id_length,
        }
    }
}
