use std::path::Path;

use crate::io::config_io::{self, ConfigError};
use crate::io::storage::{FileKvStore, KvStore, StorageError, load_board, save_board};
use crate::model::board::Board;
use crate::model::config::BoardConfig;
use crate::ops::board_ops::{self, Action, BoardError};
use crate::ops::progress::{Progress, compute_progress};

/// Error type for store mutations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("board changed but could not be saved: {0}")]
    Storage(#[from] StorageError),
}

type Listener = Box<dyn FnMut(&Board)>;

/// Owns the board and funnels every change through [`BoardStore::mutate`].
///
/// Each successful mutation is persisted before listeners are notified.
pub struct BoardStore {
    board: Board,
    kv: Box<dyn KvStore>,
    key: String,
    listeners: Vec<Listener>,
    revision: u64,
}

impl BoardStore {
    /// Load the board stored under `key` (default board when absent or corrupt)
    pub fn open(kv: Box<dyn KvStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let board = load_board(kv.as_ref(), &key);
        BoardStore {
            board,
            kv,
            key,
            listeners: Vec::new(),
            revision: 0,
        }
    }

    /// Open the file-backed store of a data directory, honouring config.toml
    pub fn open_dir(data_dir: &Path) -> Result<(Self, BoardConfig), ConfigError> {
        let config = config_io::read_config(data_dir)?;
        let path = config_io::storage_path(data_dir, &config);
        tracing::debug!(path = %path.display(), key = %config.storage.key, "opening board store");
        let store = BoardStore::open(Box::new(FileKvStore::new(path)), &config.storage.key);
        Ok((store, config))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn progress(&self) -> Progress {
        compute_progress(&self.board)
    }

    /// Incremented after every successful mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register a listener called with the new board after each mutation
    pub fn subscribe(&mut self, listener: impl FnMut(&Board) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Apply an action, persist, and notify listeners.
    ///
    /// Returns the id of a created column or task. A rejected action leaves
    /// the board untouched. A failed write keeps the in-memory change,
    /// still notifies, and reports `StoreError::Storage`.
    pub fn mutate(&mut self, action: Action) -> Result<Option<String>, StoreError> {
        tracing::debug!(?action, "mutate");
        let created = board_ops::apply(&mut self.board, action)?;
        let saved = self.save();
        self.revision += 1;
        for listener in &mut self.listeners {
            listener(&self.board);
        }
        saved?;
        Ok(created)
    }

    /// Write the current board to storage
    pub fn save(&mut self) -> Result<(), StorageError> {
        save_board(self.kv.as_mut(), &self.key, &self.board).inspect_err(|e| {
            tracing::warn!(key = %self.key, error = %e, "board save failed");
        })
    }
}
