use super::{read_documents, PersistenceProvider};
use crate::collection::Document;
use crate::errors::LilDbResult;
use parking_lot::RwLock;
use std::sync::Arc;

/// Keeps the persisted collection in memory, as the JSON lines a [super::JsonlGateway]
/// would write.
///
/// Clones share the same buffer, so a test can hand one clone to a store and inspect
/// what was persisted through another.
#[derive(Clone, Debug, Default)]
pub struct MemoryGateway {
    lines: Arc<RwLock<Option<Vec<String>>>>,
}

impl MemoryGateway {
    /// Creates a gateway with no stored collection yet.
    pub fn new() -> Self {
        MemoryGateway::default()
    }

    /// Creates a gateway that already holds the given JSON lines.
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemoryGateway {
            lines: Arc::new(RwLock::new(Some(lines.into_iter().map(|l| l.into()).collect()))),
        }
    }

    /// The stored lines, or `None` if nothing has been persisted.
    pub fn lines(&self) -> Option<Vec<String>> {
        self.lines.read().clone()
    }
}

impl PersistenceProvider for MemoryGateway {
    fn exists(&self) -> LilDbResult<bool> {
        Ok(self.lines.read().is_some())
    }

    fn load_all(&self) -> LilDbResult<Vec<Document>> {
        match self.lines.read().as_ref() {
            Some(lines) => read_documents(lines.join("\n").as_bytes()),
            None => Ok(Vec::new()),
        }
    }

    fn persist_all(&self, documents: &[&Document]) -> LilDbResult<()> {
        let mut lines = Vec::with_capacity(documents.len());
        for document in documents {
            lines.push(serde_json::to_string(document)?);
        }
        *self.lines.write() = Some(lines);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
