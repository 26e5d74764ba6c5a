use super::PersistenceProvider;
use crate::collection::Document;
use crate::common::TEMP_FILE_SUFFIX;
use crate::errors::{ErrorKind, LilDbError, LilDbResult};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Stores the collection in a JSON Lines file, one document per line.
///
/// Reading skips blank lines. Writing goes to a sibling temporary file which is then
/// renamed over the target, so readers never see a half-written file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonlGateway {
    path: PathBuf,
}

impl JsonlGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonlGateway { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp: OsString = self.path.as_os_str().to_os_string();
        tmp.push(format!("{}.{}", TEMP_FILE_SUFFIX, std::process::id()));
        PathBuf::from(tmp)
    }

    fn write_to(&self, target: &Path, documents: &[&Document]) -> LilDbResult<()> {
        let file = File::create(target)?;
        let mut writer = BufWriter::new(file);
        for document in documents {
            let line = serde_json::to_string(document)?;
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        let file = writer.into_inner().map_err(|e| {
            log::error!("Failed to flush {}: {}", target.display(), e);
            LilDbError::new(
                &format!("Failed to flush {}: {}", target.display(), e),
                ErrorKind::IOError,
            )
        })?;
        file.sync_all()?;
        Ok(())
    }
}

/// Parses JSON Lines into documents. Blank lines are skipped; line numbers in errors
/// start at 1.
pub fn read_documents(reader: impl BufRead) -> LilDbResult<Vec<Document>> {
    let mut documents = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<Document>(trimmed) {
            Ok(document) => documents.push(document),
            Err(e) => {
                log::error!("Failed to decode line {}: {}", line_no + 1, e);
                return Err(LilDbError::new(
                    &format!("Invalid document at line {}: {}", line_no + 1, e),
                    ErrorKind::EncodingError,
                ));
            }
        }
    }
    Ok(documents)
}

impl PersistenceProvider for JsonlGateway {
    fn exists(&self) -> LilDbResult<bool> {
        Ok(self.path.try_exists()?)
    }

    fn load_all(&self) -> LilDbResult<Vec<Document>> {
        if !self.exists()? {
            return Ok(Vec::new());
        }
        let file = File::open(&self.path)?;
        let documents = read_documents(BufReader::new(file))?;
        log::debug!("Loaded {} documents from {}", documents.len(), self.path.display());
        Ok(documents)
    }

    fn persist_all(&self, documents: &[&Document]) -> LilDbResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.temp_path();
        if let Err(e) = self.write_to(&tmp_path, documents) {
            log::error!("Failed to write {}: {}", tmp_path.display(), e);
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            log::error!(
                "Failed to move {} to {}: {}",
                tmp_path.display(),
                self.path.display(),
                e
            );
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        log::debug!("Persisted {} documents to {}", documents.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
