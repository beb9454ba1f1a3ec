//! Saved collection: a single JSON array file, one element per record,
//! in insertion order.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use linkshelf_common::LinkRecord;
use tracing::{debug, info};

use crate::error::{IngestError, Result};

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the collection. A missing or blank file is an empty collection;
    /// anything that is not a JSON array of records is an error.
    pub fn load(&self) -> Result<Vec<LinkRecord>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store: no file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(IngestError::io(&self.path, e)),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
            IngestError::Persistence(format!("{}: invalid JSON: {e}", self.path.display()))
        })?;
        if !value.is_array() {
            return Err(IngestError::Persistence(format!(
                "{}: expected a JSON array of links",
                self.path.display()
            )));
        }

        let records: Vec<LinkRecord> = serde_json::from_value(value).map_err(|e| {
            IngestError::Persistence(format!("{}: malformed link record: {e}", self.path.display()))
        })?;
        info!(path = %self.path.display(), count = records.len(), "store: loaded");
        Ok(records)
    }

    /// Replace the file with `records`. Written to a sibling temp file first
    /// and renamed into place, so a failed write leaves the old file intact.
    pub fn save(&self, records: &[LinkRecord]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| IngestError::io(&dir, e))?;

        let mut json = serde_json::to_string_pretty(records)?;
        json.push('\n');

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| IngestError::io(&dir, e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| IngestError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| IngestError::io(&self.path, e.error))?;

        info!(path = %self.path.display(), count = records.len(), "store: saved");
        Ok(())
    }
}
