//! Persistence adapters
//!
//! A [`Store`] holds exactly one catalog document. `load` returns `Ok(None)`
//! when nothing has been stored yet; any document that exists but cannot be
//! decoded is an error, and the caller decides whether to reseed.

use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::document;
use crate::core::error::PersistenceError;
use crate::core::state::AppState;

pub trait Store {
    fn load(&self) -> Result<Option<AppState>, PersistenceError>;
    fn save(&self, state: &AppState) -> Result<(), PersistenceError>;

    /// Human-readable location for messages
    fn describe(&self) -> String;
}

/// A JSON document on disk
#[derive(Debug, Clone)]
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

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> Result<Option<AppState>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|source| PersistenceError::Read {
            path: self.path.clone(),
            source,
        })?;
        let filename = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "catalog.json".to_string());
        document::decode_named(&content, &filename).map(Some)
    }

    /// Write to a sibling temp file, then rename over the target
    fn save(&self, state: &AppState) -> Result<(), PersistenceError> {
        let text = document::encode(state)?;
        let write_err = |source: std::io::Error| PersistenceError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let temp = self.temp_path();
        let mut file = fs::File::create(&temp).map_err(write_err)?;
        file.write_all(text.as_bytes()).map_err(write_err)?;
        file.write_all(b"\n").map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);
        fs::rename(&temp, &self.path).map_err(write_err)?;

        debug!(path = %self.path.display(), bytes = text.len(), "catalog saved");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory document, for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RefCell<Option<String>>,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with raw document text, valid or not
    pub fn with_document(text: impl Into<String>) -> Self {
        Self {
            document: RefCell::new(Some(text.into())),
            fail_saves: false,
        }
    }

    /// A store whose every save fails
    pub fn failing() -> Self {
        Self {
            document: RefCell::new(None),
            fail_saves: true,
        }
    }

    /// The last saved document text
    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Option<AppState>, PersistenceError> {
        match self.document.borrow().as_deref() {
            Some(text) => document::decode(text).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, state: &AppState) -> Result<(), PersistenceError> {
        if self.fail_saves {
            return Err(PersistenceError::Unavailable("memory store rejects saves".to_string()));
        }
        let text = document::encode(state)?;
        *self.document.borrow_mut() = Some(text);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_missing_file_loads_none() {
        let tmp = tempdir().unwrap();
        let store = JsonFileStore::new(tmp.path().join("catalog.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_round_trip_creates_parent_dirs() {
        let tmp = tempdir().unwrap();
        let store = JsonFileStore::new(tmp.path().join("nested/dir/catalog.json"));
        let state = AppState::seed();
        store.save(&state).unwrap();

        assert!(store.exists());
        assert!(!store.temp_path().exists());
        assert_eq!(store.load().unwrap(), Some(state));
    }

    #[test]
    fn test_file_store_invalid_document_is_an_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("catalog.json");
        fs::write(&path, "{\"bdd1_TypeProjet\": []}").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(PersistenceError::Invalid(_))));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        store.save(&AppState::seed()).unwrap();
        assert_eq!(store.load().unwrap(), Some(AppState::seed()));
        assert!(store.document().unwrap().contains("bddTb1_Projects"));
    }

    #[test]
    fn test_failing_memory_store() {
        let store = MemoryStore::failing();
        assert!(matches!(
            store.save(&AppState::seed()),
            Err(PersistenceError::Unavailable(_))
        ));
        assert!(store.document().is_none());
    }
}
