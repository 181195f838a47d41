//! JSON-file persistence for probe records.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::warn;

use crate::record::{ProbeRecord, RecordId};

/// Errors that can occur during session storage operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to create a directory.
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to read a file.
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to delete a file.
    #[error("failed to delete file '{path}': {source}")]
    DeleteFile {
        /// The path that could not be deleted.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to read the records directory.
    #[error("failed to read directory '{path}': {source}")]
    ReadDir {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse a record file.
    #[error("failed to parse record file '{path}': {source}")]
    ParseJson {
        /// The path that could not be parsed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// Failed to serialize a record.
    #[error("failed to serialize record: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// Record not found.
    #[error("record not found: {0}")]
    RecordNotFound(RecordId),
}

/// Result type for session storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persists probe records as JSON files.
///
/// Records live under `<base>/records/<id>.json`. The store is plain
/// synchronous filesystem access; records are small and written once per
/// run.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Base directory for session storage.
    base_path: PathBuf,
    /// Directory holding record JSON files.
    records_path: PathBuf,
}

impl SessionStore {
    /// Creates a store rooted at the given base path.
    ///
    /// Creates the necessary subdirectories if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    pub fn new(base_path: PathBuf) -> Result<Self> {
        let records_path = base_path.join("records");

        for path in [&base_path, &records_path] {
            if !path.exists() {
                fs::create_dir_all(path).map_err(|e| StoreError::CreateDir {
                    path: path.clone(),
                    source: e,
                })?;
            }
        }

        Ok(Self {
            base_path,
            records_path,
        })
    }

    /// Returns the default path for netsonde session storage.
    ///
    /// Uses the platform data directory (e.g. `~/.local/share/netsonde/` on
    /// Linux), falling back to `~/.netsonde/` when it cannot be determined.
    #[must_use]
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "netsonde").map_or_else(dirs_fallback, |proj_dirs| {
            proj_dirs.data_dir().to_path_buf()
        })
    }

    /// Creates a store at the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    pub fn with_default_path() -> Result<Self> {
        Self::new(Self::default_path())
    }

    /// Returns the base path for session storage.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the path to a record's JSON file.
    #[must_use]
    pub fn record_path(&self, id: RecordId) -> PathBuf {
        self.records_path.join(format!("{id}.json"))
    }

    /// Saves a record, overwriting any previous version.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written.
    pub fn save(&self, record: &ProbeRecord) -> Result<()> {
        let path = self.record_path(record.id);
        let json = serde_json::to_string_pretty(record)?;

        fs::write(&path, json).map_err(|e| StoreError::WriteFile { path, source: e })
    }

    /// Loads a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RecordNotFound`] if no such record exists, or
    /// an error if the file cannot be read or parsed.
    pub fn load(&self, id: RecordId) -> Result<ProbeRecord> {
        let path = self.record_path(id);

        if !path.exists() {
            return Err(StoreError::RecordNotFound(id));
        }

        let content = fs::read_to_string(&path).map_err(|e| StoreError::ReadFile {
            path: path.clone(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| StoreError::ParseJson { path, source: e })
    }

    /// Lists all records, newest first.
    ///
    /// Corrupt record files are skipped with a warning rather than failing
    /// the whole listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the records directory cannot be read.
    pub fn list(&self) -> Result<Vec<ProbeRecord>> {
        let entries = fs::read_dir(&self.records_path).map_err(|e| StoreError::ReadDir {
            path: self.records_path.clone(),
            source: e,
        })?;

        let mut records = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| StoreError::ReadDir {
                path: self.records_path.clone(),
                source: e,
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let content = fs::read_to_string(&path).map_err(|e| StoreError::ReadFile {
                    path: path.clone(),
                    source: e,
                })?;

                match serde_json::from_str::<ProbeRecord>(&content) {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "skipping unparseable record file");
                    }
                }
            }
        }

        records.sort_by(|a, b| b.started_at.cmp(&a.started_at));

        Ok(records)
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RecordNotFound`] if no such record exists, or
    /// an error if the file cannot be deleted.
    pub fn delete(&self, id: RecordId) -> Result<()> {
        let path = self.record_path(id);

        if !path.exists() {
            return Err(StoreError::RecordNotFound(id));
        }

        fs::remove_file(&path).map_err(|e| StoreError::DeleteFile { path, source: e })
    }

    /// Deletes all finished records, returning their ids.
    ///
    /// # Errors
    ///
    /// Returns an error if records cannot be listed or deleted.
    pub fn clean_finished(&self) -> Result<Vec<RecordId>> {
        let mut cleaned = Vec::new();

        for record in self.list()? {
            if record.status.is_finished() {
                self.delete(record.id)?;
                cleaned.push(record.id);
            }
        }

        Ok(cleaned)
    }
}

/// Fallback for determining the storage directory.
fn dirs_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".netsonde")
}
