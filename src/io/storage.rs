use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::board::Board;
use crate::ops::board_ops::default_board;

/// Error type for key/value storage
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not serialize board: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// A client-local string key/value store
pub trait KvStore {
    /// Read the value stored under `key`. Unreadable data reads as absent.
    fn get(&self, key: &str) -> Option<String>;
    /// Overwrite the value stored under `key`
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

/// Key/value store backed by a single JSON object file
#[derive(Debug, Clone)]
pub struct FileKvStore {
    path: PathBuf,
}

impl FileKvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileKvStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return BTreeMap::new(),
        };
        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable storage file");
                BTreeMap::new()
            }
        }
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_entries().remove(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.read_entries();
        entries.insert(key.to_string(), value);
        let content = serde_json::to_string_pretty(&entries)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| StorageError::WriteError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        atomic_write(&self.path, content.as_bytes()).map_err(|e| StorageError::WriteError {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// In-memory key/value store
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: BTreeMap<String, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Load the board stored under `key`, or a fresh default board when the
/// value is missing or does not parse.
pub fn load_board(store: &dyn KvStore, key: &str) -> Board {
    let Some(raw) = store.get(key) else {
        tracing::debug!(key, "no stored board, using default");
        return default_board();
    };
    match serde_json::from_str(&raw) {
        Ok(board) => board,
        Err(e) => {
            tracing::warn!(key, error = %e, "stored board is malformed, using default");
            default_board()
        }
    }
}

/// Serialize the whole board and overwrite the value under `key`
pub fn save_board(store: &mut dyn KvStore, key: &str, board: &Board) -> Result<(), StorageError> {
    let json = serde_json::to_string(board)?;
    store.set(key, json)
}
